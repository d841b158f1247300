//! Electronic Code Book
//!
//! Every block is transformed independently. No padding: the caller hands in
//! whole blocks.

use crate::cipher::BlockCipher;
use crate::types::{Error, Result};

/// ECB over any [`BlockCipher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ecb<C> {
    cipher: C,
}

impl<C: BlockCipher> Ecb<C> {
    /// Wrap a cipher.
    pub const fn new(cipher: C) -> Self {
        Self { cipher }
    }

    /// Underlying cipher.
    pub const fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Block size in bytes.
    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    /// Encrypt `buffer` in place, block by block.
    ///
    /// # Errors
    /// [`Error::UnalignedBuffer`] if the length is not a multiple of the block
    /// size (nothing is modified), or a key expansion error.
    pub fn encrypt(&self, buffer: &mut [u8], key: &[u8]) -> Result<()> {
        self.check_aligned(buffer)?;
        let schedule = self.cipher.expand_key(key)?;
        for block in buffer.chunks_exact_mut(self.block_size()) {
            self.cipher.encrypt_block_with(&schedule, block);
        }
        Ok(())
    }

    /// Decrypt `buffer` in place, block by block.
    ///
    /// # Errors
    /// [`Error::UnalignedBuffer`] if the length is not a multiple of the block
    /// size (nothing is modified), or a key expansion error.
    pub fn decrypt(&self, buffer: &mut [u8], key: &[u8]) -> Result<()> {
        self.check_aligned(buffer)?;
        let schedule = self.cipher.expand_key(key)?;
        for block in buffer.chunks_exact_mut(self.block_size()) {
            self.cipher.decrypt_block_with(&schedule, block);
        }
        Ok(())
    }

    fn check_aligned(&self, buffer: &[u8]) -> Result<()> {
        let block_size = self.block_size();
        if buffer.len().is_multiple_of(block_size) {
            Ok(())
        } else {
            Err(Error::UnalignedBuffer {
                len: buffer.len(),
                block_size,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cipher::rc6::Rc6;

    #[test]
    fn test_encrypt_decrypt_zeroes() {
        let ecb = Ecb::new(Rc6::<u32>::default());
        let key = [0u8; 32];
        let expected = vec![0u8; 256];

        let mut buffer = expected.clone();
        ecb.encrypt(&mut buffer, &key).unwrap();
        assert_ne!(buffer, expected);
        ecb.decrypt(&mut buffer, &key).unwrap();
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_blocks_are_independent() {
        // Identical plaintext blocks encrypt to identical ciphertext blocks.
        let ecb = Ecb::new(Rc6::<u32>::default());
        let mut buffer = [0x5Au8; 48];
        ecb.encrypt(&mut buffer, b"ecb key").unwrap();
        assert_eq!(buffer[0..16], buffer[16..32]);
        assert_eq!(buffer[16..32], buffer[32..48]);
    }

    #[test]
    fn test_matches_single_block_cipher() {
        let rc6 = Rc6::<u64>::default();
        let ecb = Ecb::new(rc6);
        let key = [3u8; 24];

        let mut buffer: Vec<u8> = (0..64).collect();
        let mut first: Vec<u8> = (0..32).collect();
        ecb.encrypt(&mut buffer, &key).unwrap();
        rc6.encrypt_block(&mut first, &key).unwrap();
        assert_eq!(buffer[..32], first[..]);
    }

    #[test]
    fn test_unaligned_buffer_untouched() {
        let ecb = Ecb::new(Rc6::<u32>::default());
        let mut buffer = [9u8; 20];
        assert_eq!(
            ecb.encrypt(&mut buffer, &[0u8; 16]).unwrap_err(),
            Error::UnalignedBuffer {
                len: 20,
                block_size: 16
            }
        );
        assert_eq!(buffer, [9u8; 20]);
    }

    #[test]
    fn test_empty_buffer() {
        let ecb = Ecb::new(Rc6::<u32>::default());
        let mut buffer = [0u8; 0];
        assert!(ecb.encrypt(&mut buffer, &[0u8; 16]).is_ok());
    }
}
