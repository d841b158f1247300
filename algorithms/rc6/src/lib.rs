//! # RC6
//!
//! The RC6 block cipher over 32- and 64-bit words, ECB and CTR modes, the
//! Polyval universal hash and a nonce-based AEAD built from them.

//! # Usage
//! ```rust
//! // 1. One-shot AEAD (random nonce, prepended)
//! let key = [0x42u8; 16];
//! let sealed = rc6::seal(&key, b"Attack at dawn", b"header")?;
//! let opened = rc6::open(&key, &sealed, b"header")?;
//! assert_eq!(opened, b"Attack at dawn");
//!
//! // 2. Explicit nonce, 256-bit blocks
//! use rc6::Aead;
//!
//! let aead = Aead::<u64>::new(&key)?;
//! let sealed = aead.seal_with_nonce(b"payload", b"", &[7u8; 12])?;
//! assert_eq!(aead.open_with_nonce(&sealed, b"", &[7u8; 12])?, b"payload");
//!
//! // 3. Raw block cipher
//! use rc6::{BlockCipher, Rc6};
//!
//! let mut block = [0u8; 16];
//! Rc6::<u32>::default().encrypt_block(&mut block, &[0u8; 16])?;
//! # Ok::<(), rc6::Error>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod aead;
pub mod cipher;
pub mod engine;
pub mod mode;
mod oneshot;
pub(crate) mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use aead::field::FieldElement;
pub use aead::polyval::Polyval;
pub use aead::{check_lengths, Aead, DerivedKeys};
pub use cipher::rc6::{KeySchedule, Rc6, DEFAULT_HALF_ROUNDS};
pub use cipher::word::Word;
pub use cipher::BlockCipher;
pub use engine::dispatcher::{Dispatch, CHUNK_SIZE};
pub use mode::{Counter, Ctr, Ecb};
pub use oneshot::{open, seal};
pub use types::{Error, Result, FIELD_BLOCK_SIZE, MAX_DATA_SIZE, MAX_KEY_BITS, NONCE_SIZE};

/// Returns the name of the parallel backend compiled in.
#[must_use]
pub const fn active_backend() -> &'static str {
    engine::get_active_backend_name()
}
