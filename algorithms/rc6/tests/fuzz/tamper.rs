use bolero::check;
use rc6::{Aead, Error};

#[test]
fn fuzz_tamper_detection() {
    check!()
        .with_type::<(Vec<u8>, u16, u8)>()
        .for_each(|(plaintext, position, bit)| {
            let Ok(aead) = Aead::<u32>::new(&[0x11u8; 16]) else {
                return;
            };
            let Ok(sealed) = aead.seal(plaintext, b"aad") else {
                return;
            };

            // =============================================================================
            // POSITIVE TEST
            // =============================================================================

            assert_eq!(aead.open(&sealed, b"aad").ok().as_ref(), Some(plaintext));

            // =============================================================================
            // NEGATIVE TEST (SINGLE BIT FLIP)
            // =============================================================================

            let mut tampered = sealed.clone();
            let index = usize::from(*position) % tampered.len();
            tampered[index] ^= 1 << (bit % 8);
            assert_eq!(
                aead.open(&tampered, b"aad"),
                Err(Error::AuthenticationFailed),
                "bit flip at {index} was accepted"
            );
        });
}

#[test]
fn fuzz_open_garbage() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        // Arbitrary input must never panic and never authenticate.
        if let Ok(aead) = Aead::<u32>::new(&[0x22u8; 32]) {
            assert!(aead.open(data, b"").is_err());
        }
    });
}
