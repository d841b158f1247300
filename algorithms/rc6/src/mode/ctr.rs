//! Counter Mode
//!
//! Turns a block cipher into a keystream generator: encrypt successive
//! counter blocks and XOR the output into the data. The same call encrypts
//! and decrypts.
//!
//! The initial counter is the tag with the top bit of its last byte set.
//! Only the first four bytes count: they hold a little-endian 32-bit counter
//! that wraps without carrying into the rest of the block.

use crate::cipher::{check_block, BlockCipher};
use crate::engine::dispatcher::{worker_count, Dispatch, CHUNK_SIZE};
use crate::engine::parallel::ChunkProcessorMut;
use crate::types::{Error, Result};
use core::fmt;
use zeroize::Zeroize;

/// Bytes of the block that act as the running counter.
pub const COUNTER_BYTES: usize = 4;

// =============================================================================
// COUNTER
// =============================================================================

/// Counter block derived from a tag.
#[derive(Clone, PartialEq, Eq)]
pub struct Counter {
    block: Vec<u8>,
}

impl Counter {
    /// Copy `tag` and force the high bit of its last byte.
    pub fn from_tag(tag: &[u8]) -> Self {
        let mut block = tag.to_vec();
        if let Some(last) = block.last_mut() {
            *last |= 0x80;
        }
        Self { block }
    }

    /// Current counter block.
    pub fn as_bytes(&self) -> &[u8] {
        &self.block
    }

    /// Step to the next block.
    pub fn increment(&mut self) {
        self.advance(1);
    }

    /// Step forward `n` blocks (modulo 2^32).
    pub fn advance(&mut self, n: u32) {
        let width = COUNTER_BYTES.min(self.block.len());
        let mut bytes = [0u8; COUNTER_BYTES];
        bytes[..width].copy_from_slice(&self.block[..width]);
        let value = u32::from_le_bytes(bytes).wrapping_add(n);
        self.block[..width].copy_from_slice(&value.to_le_bytes()[..width]);
    }

    /// Copy of this counter stepped forward `n` blocks.
    #[must_use]
    pub fn advanced_by(&self, n: u32) -> Self {
        let mut next = self.clone();
        next.advance(n);
        next
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter(")?;
        for byte in &self.block {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

// =============================================================================
// CTR MODE
// =============================================================================

/// CTR over any [`BlockCipher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ctr<C> {
    cipher: C,
}

impl<C: BlockCipher> Ctr<C> {
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

    /// Initial counter for `tag`.
    ///
    /// # Errors
    /// [`Error::InvalidBlockLength`](crate::Error::InvalidBlockLength) if the
    /// tag is not one block long.
    pub fn init_counter(&self, tag: &[u8]) -> Result<Counter> {
        check_block(tag.len(), self.block_size())?;
        Ok(Counter::from_tag(tag))
    }

    /// Encrypt or decrypt `buffer` in place, one block after another.
    ///
    /// The final chunk may be shorter than a block; only that many keystream
    /// bytes are used.
    ///
    /// # Errors
    /// Invalid tag length or key expansion failure. The buffer is untouched
    /// on error.
    pub fn crypt(&self, buffer: &mut [u8], key: &[u8], tag: &[u8]) -> Result<()> {
        let mut counter = self.init_counter(tag)?;
        let schedule = self.cipher.expand_key(key)?;
        let mut keystream = vec![0u8; self.block_size()];
        for chunk in buffer.chunks_mut(self.block_size()) {
            self.apply_keystream(&schedule, &mut counter, &mut keystream, chunk);
        }
        keystream.zeroize();
        Ok(())
    }

    /// Same output as [`crypt`](Self::crypt), computed on the worker pool.
    ///
    /// The buffer is cut into [`CHUNK_SIZE`] chunks. Each chunk's starting
    /// counter is the base counter advanced by the number of blocks before
    /// it, computed before any work is dispatched, so the result does not
    /// depend on scheduling order.
    ///
    /// # Errors
    /// Invalid tag length or key expansion failure. The buffer is untouched
    /// on error.
    pub fn crypt_parallel(&self, buffer: &mut [u8], key: &[u8], tag: &[u8]) -> Result<()> {
        let base = self.init_counter(tag)?;
        let schedule = self.cipher.expand_key(key)?;

        let block_size = self.block_size();
        let chunk_size = (CHUNK_SIZE / block_size).max(1) * block_size;
        let blocks_per_chunk = chunk_size / block_size;

        #[allow(clippy::cast_possible_truncation)] // counter arithmetic is mod 2^32
        let counters: Vec<Counter> = (0..buffer.len().div_ceil(chunk_size))
            .map(|index| base.advanced_by((index * blocks_per_chunk) as u32))
            .collect();

        tracing::trace!(
            len = buffer.len(),
            chunks = counters.len(),
            workers = worker_count(),
            "dispatching parallel ctr"
        );

        buffer.process_chunks_seeded(chunk_size, counters, |mut counter, chunk| {
            let mut keystream = vec![0u8; block_size];
            for block in chunk.chunks_mut(block_size) {
                self.apply_keystream(&schedule, &mut counter, &mut keystream, block);
            }
            keystream.zeroize();
        });
        Ok(())
    }

    /// Run [`crypt`](Self::crypt) or [`crypt_parallel`](Self::crypt_parallel)
    /// according to `dispatch`.
    ///
    /// # Errors
    /// See [`crypt`](Self::crypt).
    pub fn crypt_with(
        &self,
        buffer: &mut [u8],
        key: &[u8],
        tag: &[u8],
        dispatch: Dispatch,
    ) -> Result<()> {
        if dispatch.is_parallel(buffer.len()) {
            self.crypt_parallel(buffer, key, tag)
        } else {
            self.crypt(buffer, key, tag)
        }
    }

    /// Process one block (or a final partial block) with an externally
    /// tracked counter, then advance the counter. For streaming callers:
    /// start from [`init_counter`](Self::init_counter).
    ///
    /// # Errors
    /// Returns `InvalidBlockLength` if `counter` is not one block long or
    /// `chunk` is longer than a block. Neither is touched in that case.
    pub fn crypt_block(
        &self,
        schedule: &C::Schedule,
        counter: &mut Counter,
        chunk: &mut [u8],
    ) -> Result<()> {
        let block_size = self.block_size();
        check_block(counter.as_bytes().len(), block_size)?;
        if chunk.len() > block_size {
            return Err(Error::InvalidBlockLength {
                expected: block_size,
                len: chunk.len(),
            });
        }

        let mut keystream = vec![0u8; block_size];
        self.apply_keystream(schedule, counter, &mut keystream, chunk);
        keystream.zeroize();
        Ok(())
    }

    fn apply_keystream(
        &self,
        schedule: &C::Schedule,
        counter: &mut Counter,
        keystream: &mut [u8],
        chunk: &mut [u8],
    ) {
        keystream.copy_from_slice(counter.as_bytes());
        self.cipher.encrypt_block_with(schedule, keystream);
        for (byte, key_byte) in chunk.iter_mut().zip(keystream.iter()) {
            *byte ^= key_byte;
        }
        counter.increment();
    }
}
