#![no_main]

use libfuzzer_sys::fuzz_target;
use rc6::{Aead, Dispatch, NONCE_SIZE};

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    // Split input: nonce, then AAD length byte, AAD and plaintext
    if data.len() < NONCE_SIZE + 1 {
        return;
    }
    let (nonce, rest) = data.split_at(NONCE_SIZE);
    let aad_len = usize::from(rest[0]).min(rest.len() - 1);
    let (aad, plaintext) = rest[1..].split_at(aad_len);

    // =============================================================================
    // 1. SEAL / OPEN
    // =============================================================================

    let Ok(aead) = Aead::<u32>::new(&[0x42u8; 16]) else {
        return;
    };
    let sealed = aead
        .seal_with_nonce(plaintext, aad, nonce)
        .unwrap_or_else(|e| panic!("seal failed: {e}"));
    let opened = aead
        .open_with_nonce(&sealed, aad, nonce)
        .unwrap_or_else(|e| panic!("open failed: {e}"));
    assert_eq!(opened, plaintext, "roundtrip mismatch");

    // =============================================================================
    // 2. DISPATCH INDEPENDENCE
    // =============================================================================

    let parallel = aead.with_dispatch(Dispatch::Parallel);
    assert_eq!(
        parallel.seal_with_nonce(plaintext, aad, nonce).ok(),
        Some(sealed),
        "parallel seal differs"
    );
});
