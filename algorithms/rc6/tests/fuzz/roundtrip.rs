use bolero::check;
use rc6::Aead;

#[test]
fn fuzz_aead_roundtrip() {
    check!()
        .with_type::<(Vec<u8>, Vec<u8>, [u8; 12])>()
        .for_each(|(plaintext, aad, nonce)| {
            // =============================================================================
            // 128-BIT BLOCKS
            // =============================================================================

            if let Ok(aead) = Aead::<u32>::new(&[0x5Au8; 16]) {
                let sealed = aead.seal_with_nonce(plaintext, aad, nonce);
                assert!(sealed.is_ok(), "seal failed on valid input");
                if let Ok(sealed) = sealed {
                    assert_eq!(sealed.len(), plaintext.len() + 16);
                    let opened = aead.open_with_nonce(&sealed, aad, nonce);
                    assert_eq!(opened.ok().as_ref(), Some(plaintext), "roundtrip mismatch");
                }
            }

            // =============================================================================
            // 256-BIT BLOCKS
            // =============================================================================

            if let Ok(aead) = Aead::<u64>::new(&[0xA5u8; 32]) {
                if let Ok(sealed) = aead.seal_with_nonce(plaintext, aad, nonce) {
                    let opened = aead.open_with_nonce(&sealed, aad, nonce);
                    assert_eq!(opened.ok().as_ref(), Some(plaintext), "wide roundtrip mismatch");
                }
            }
        });
}
