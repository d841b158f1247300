//! Block Ciphers
//!
//! The [`BlockCipher`] trait is the seam between ciphers and modes of
//! operation: ECB, CTR and the AEAD are generic over it and monomorphize per
//! cipher, with no runtime dispatch.

pub mod constants;
pub mod rc6;
pub mod word;

use crate::types::{Error, Result};

// =============================================================================
// CIPHER INTERFACE
// =============================================================================

/// A keyed permutation over fixed-size byte blocks.
pub trait BlockCipher: Send + Sync {
    /// Expanded key material, derived once per key and reused across blocks.
    type Schedule: Send + Sync;

    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Expand a user key.
    ///
    /// # Errors
    /// Whatever key validation the cipher performs (e.g. [`Error::KeyTooLong`]).
    fn expand_key(&self, key: &[u8]) -> Result<Self::Schedule>;

    /// Encrypt one block in place under an expanded key.
    ///
    /// # Panics
    /// If `block` is shorter than [`block_size`](Self::block_size).
    fn encrypt_block_with(&self, schedule: &Self::Schedule, block: &mut [u8]);

    /// Decrypt one block in place under an expanded key.
    ///
    /// # Panics
    /// If `block` is shorter than [`block_size`](Self::block_size).
    fn decrypt_block_with(&self, schedule: &Self::Schedule, block: &mut [u8]);

    /// Encrypt one block in place, expanding `key` for this call only.
    ///
    /// # Errors
    /// [`Error::InvalidBlockLength`] if `block` is not exactly one block, or a
    /// key expansion error.
    fn encrypt_block(&self, block: &mut [u8], key: &[u8]) -> Result<()> {
        check_block(block.len(), self.block_size())?;
        let schedule = self.expand_key(key)?;
        self.encrypt_block_with(&schedule, block);
        Ok(())
    }

    /// Decrypt one block in place, expanding `key` for this call only.
    ///
    /// # Errors
    /// [`Error::InvalidBlockLength`] if `block` is not exactly one block, or a
    /// key expansion error.
    fn decrypt_block(&self, block: &mut [u8], key: &[u8]) -> Result<()> {
        check_block(block.len(), self.block_size())?;
        let schedule = self.expand_key(key)?;
        self.decrypt_block_with(&schedule, block);
        Ok(())
    }
}

/// Reject anything that is not exactly one block.
pub(crate) const fn check_block(len: usize, expected: usize) -> Result<()> {
    if len == expected {
        Ok(())
    } else {
        Err(Error::InvalidBlockLength { expected, len })
    }
}
