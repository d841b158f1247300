#![no_main]

use libfuzzer_sys::fuzz_target;
use rc6::{Aead, Error};

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    // First 32 bytes (when present) select the key, the rest is the sealed input
    let mut key = [0u8; 32];
    let body_start = if data.len() >= 32 {
        key.copy_from_slice(&data[0..32]);
        32
    } else {
        0
    };
    let body = &data[body_start..];

    // =============================================================================
    // 1. ARBITRARY CIPHERTEXT
    // =============================================================================

    // Garbage must be rejected with a typed error, never a panic
    if let Ok(aead) = Aead::<u32>::new(&key) {
        match aead.open(body, b"") {
            Err(Error::AuthenticationFailed | Error::CiphertextTooShort { .. }) => {}
            other => panic!("unexpected result on garbage input: {other:?}"),
        }
    }

    // =============================================================================
    // 2. ARBITRARY CIPHERTEXT, WIDE BLOCKS
    // =============================================================================

    if let Ok(aead) = Aead::<u64>::new(&key[..16]) {
        assert!(aead.open(body, body).is_err(), "garbage authenticated");
    }
});
