//! Shared types used across the RC6 library.

use thiserror::Error;

// =============================================================================
// SIZES & LIMITS
// =============================================================================

/// Nonce length for the AEAD construction (96 bits).
pub const NONCE_SIZE: usize = 96 / 8;

/// Largest plaintext or associated data accepted by the AEAD, exclusive (2^36 bytes).
pub const MAX_DATA_SIZE: u64 = 1 << 36;

/// Largest RC6 key, in bits.
pub const MAX_KEY_BITS: usize = 8 * 255;

/// Size of one Polyval field block.
pub const FIELD_BLOCK_SIZE: usize = 16;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors reported by the cipher, the modes of operation and the AEAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Cipher key longer than 2040 bits.
    #[error("key can't be greater than 2040 bits, got {bits}")]
    KeyTooLong {
        /// Bit length of the rejected key.
        bits: usize,
    },

    /// Key generating key is neither 16 nor 32 bytes.
    #[error("key generating key must be 16 or 32 bytes, got {len}")]
    InvalidKeyLength {
        /// Byte length of the rejected key.
        len: usize,
    },

    /// Nonce is not exactly 12 bytes.
    #[error("nonce must be 12 bytes, got {len}")]
    InvalidNonceLength {
        /// Byte length of the rejected nonce.
        len: usize,
    },

    /// Plaintext or associated data reaches 2^36 bytes.
    #[error("data must be smaller than 2^36 bytes, got {len}")]
    DataTooLarge {
        /// Byte length of the rejected input.
        len: u64,
    },

    /// A single block (or tag) does not match the cipher block size.
    #[error("expected a {expected}-byte block, got {len}")]
    InvalidBlockLength {
        /// Cipher block size.
        expected: usize,
        /// Length that was supplied.
        len: usize,
    },

    /// Buffer handed to ECB is not a whole number of blocks.
    #[error("buffer of {len} bytes is not a multiple of the {block_size}-byte block size")]
    UnalignedBuffer {
        /// Byte length of the buffer.
        len: usize,
        /// Cipher block size.
        block_size: usize,
    },

    /// Sealed input is too short to hold the nonce and/or the tag.
    #[error("ciphertext must be at least {min} bytes, got {len}")]
    CiphertextTooShort {
        /// Minimum acceptable length.
        min: usize,
        /// Length that was supplied.
        len: usize,
    },

    /// Tag mismatch on open.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
