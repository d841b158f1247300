use bolero::check;
use rc6::{Ctr, Rc6};

#[test]
fn fuzz_ctr_self_inverse() {
    check!()
        .with_type::<(Vec<u8>, Vec<u8>, [u8; 16])>()
        .for_each(|(data, key, tag)| {
            let ctr = Ctr::new(Rc6::<u32>::default());
            let key = &key[..key.len().min(255)];

            let mut buffer = data.clone();
            if ctr.crypt(&mut buffer, key, tag).is_ok() {
                // =============================================================================
                // PARALLEL MATCHES SEQUENTIAL
                // =============================================================================

                let mut parallel = data.clone();
                assert!(ctr.crypt_parallel(&mut parallel, key, tag).is_ok());
                assert_eq!(buffer, parallel, "parallel keystream mismatch");

                // =============================================================================
                // SELF-INVERSE
                // =============================================================================

                assert!(ctr.crypt(&mut buffer, key, tag).is_ok());
                assert_eq!(&buffer, data, "CTR is not self-inverse");
            }
        });
}
