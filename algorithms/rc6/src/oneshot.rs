//! One-shot AEAD helpers over `Rc6<u32>` with default settings.

use crate::aead::Aead;
use crate::types::Result;

// =============================================================================
// SEAL & OPEN
// =============================================================================

/// Encrypt and authenticate `plaintext` with a random nonce.
///
/// Returns `nonce || ciphertext || tag`.
///
/// # Errors
/// Invalid key length or oversized input.
pub fn seal(kgk: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    Aead::<u32>::new(kgk)?.seal(plaintext, aad)
}

/// Decrypt and verify the output of [`seal`].
///
/// # Errors
/// Invalid key length, truncated input or
/// [`AuthenticationFailed`](crate::Error::AuthenticationFailed).
pub fn open(kgk: &[u8], sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    Aead::<u32>::new(kgk)?.open(sealed, aad)
}
