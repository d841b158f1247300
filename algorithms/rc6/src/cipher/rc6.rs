//! RC6 Block Cipher
//!
//! Four-register ARX cipher parameterized over the word type `W`
//! (`RC6-w/r/b` with `w = W::BITS`, `r` half-rounds, `b` key bytes up to 255).
//! A block is four words, so `Rc6<u32>` works on 16-byte blocks and
//! `Rc6<u64>` on 32-byte blocks. Words are always read little-endian.

use crate::cipher::word::{rotate_left, rotate_right, Word};
use crate::cipher::BlockCipher;
use crate::types::{Error, Result, MAX_KEY_BITS};
use core::fmt;
use core::marker::PhantomData;
use zeroize::Zeroize;

/// Half-rounds used by [`Rc6::default`].
pub const DEFAULT_HALF_ROUNDS: usize = 20;

// =============================================================================
// KEY SCHEDULE
// =============================================================================

/// Round keys `S[0 .. 2r + 4]` expanded from a user key.
///
/// Wiped on drop.
pub struct KeySchedule<W: Word> {
    words: Vec<W>,
}

impl<W: Word> KeySchedule<W> {
    /// Round key words.
    pub fn as_slice(&self) -> &[W] {
        &self.words
    }

    /// Number of round keys (`2r + 4`).
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`: a schedule holds at least the four whitening keys.
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Half-rounds this schedule was expanded for.
    pub const fn half_rounds(&self) -> usize {
        (self.words.len() - 4) / 2
    }
}

impl<W: Word> Drop for KeySchedule<W> {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}

impl<W: Word> fmt::Debug for KeySchedule<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySchedule")
            .field("len", &self.words.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// CIPHER
// =============================================================================

/// RC6 over words of type `W`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rc6<W: Word = u32> {
    half_rounds: usize,
    _word: PhantomData<W>,
}

impl<W: Word> Default for Rc6<W> {
    fn default() -> Self {
        Self::new(DEFAULT_HALF_ROUNDS)
    }
}

impl<W: Word> Rc6<W> {
    /// Create a cipher running `half_rounds` half-rounds.
    pub const fn new(half_rounds: usize) -> Self {
        Self {
            half_rounds,
            _word: PhantomData,
        }
    }

    /// Configured half-rounds.
    pub const fn half_rounds(&self) -> usize {
        self.half_rounds
    }

    /// Block size in bytes (four words).
    pub const fn block_size(&self) -> usize {
        4 * W::BYTES
    }

    const fn schedule_len(self) -> usize {
        2 * self.half_rounds + 4
    }

    /// Expand a user key of up to 255 bytes into round keys.
    ///
    /// The key is zero-padded to whole words and read little-endian; an empty
    /// key counts as a single zero word.
    ///
    /// # Errors
    /// [`Error::KeyTooLong`] if the key exceeds 2040 bits.
    #[allow(clippy::many_single_char_names)]
    pub fn key_schedule(&self, key: &[u8]) -> Result<KeySchedule<W>> {
        let bits = key.len() * 8;
        if bits > MAX_KEY_BITS {
            return Err(Error::KeyTooLong { bits });
        }

        // L[0..c): user key as little-endian words
        let total_words = key.len().div_ceil(W::BYTES).max(1);
        let mut padded = vec![0u8; total_words * W::BYTES];
        padded[..key.len()].copy_from_slice(key);
        let mut le_words: Vec<W> = padded.chunks_exact(W::BYTES).map(W::load_le).collect();
        padded.zeroize();

        // S[0..t): arithmetic progression seeded by the magic constants
        let t = self.schedule_len();
        let mut schedule = Vec::with_capacity(t);
        schedule.push(W::P);
        for i in 1..t {
            let prev: W = schedule[i - 1];
            schedule.push(prev.wrapping_add(W::Q));
        }

        // Mix L into S
        let (mut a, mut b) = (W::ZERO, W::ZERO);
        let (mut i, mut j) = (0, 0);
        for _ in 0..3 * total_words.max(t) {
            a = rotate_left(schedule[i].wrapping_add(a).wrapping_add(b), 3);
            schedule[i] = a;
            let ab = a.wrapping_add(b);
            b = rotate_left(le_words[j].wrapping_add(ab), ab.rotation());
            le_words[j] = b;

            i = (i + 1) % t;
            j = (j + 1) % total_words;
        }
        le_words.zeroize();

        Ok(KeySchedule { words: schedule })
    }

    /// Encrypt a block of four words, expanding `key` for this call.
    ///
    /// # Errors
    /// [`Error::KeyTooLong`] if the key exceeds 2040 bits.
    pub fn encrypt_words(&self, block: &mut [W; 4], key: &[u8]) -> Result<()> {
        let schedule = self.key_schedule(key)?;
        Self::encrypt_words_with(&schedule, block);
        Ok(())
    }

    /// Decrypt a block of four words, expanding `key` for this call.
    ///
    /// # Errors
    /// [`Error::KeyTooLong`] if the key exceeds 2040 bits.
    pub fn decrypt_words(&self, block: &mut [W; 4], key: &[u8]) -> Result<()> {
        let schedule = self.key_schedule(key)?;
        Self::decrypt_words_with(&schedule, block);
        Ok(())
    }

    /// Encrypt a block of four words under an expanded key.
    ///
    /// The round count comes from the schedule itself.
    #[allow(clippy::many_single_char_names)]
    pub fn encrypt_words_with(schedule: &KeySchedule<W>, block: &mut [W; 4]) {
        let s = schedule.as_slice();
        let rounds = schedule.half_rounds();
        let [mut a, mut b, mut c, mut d] = *block;

        b = b.wrapping_add(s[0]);
        d = d.wrapping_add(s[1]);
        for i in 1..=rounds {
            let t = rotate_left(quadratic(b), W::LG_BITS);
            let u = rotate_left(quadratic(d), W::LG_BITS);
            a = rotate_left(a ^ t, u.rotation()).wrapping_add(s[2 * i]);
            c = rotate_left(c ^ u, t.rotation()).wrapping_add(s[2 * i + 1]);
            (a, b, c, d) = (b, c, d, a);
        }
        a = a.wrapping_add(s[2 * rounds + 2]);
        c = c.wrapping_add(s[2 * rounds + 3]);

        *block = [a, b, c, d];
    }

    /// Decrypt a block of four words under an expanded key.
    #[allow(clippy::many_single_char_names)]
    pub fn decrypt_words_with(schedule: &KeySchedule<W>, block: &mut [W; 4]) {
        let s = schedule.as_slice();
        let rounds = schedule.half_rounds();
        let [mut a, mut b, mut c, mut d] = *block;

        c = c.wrapping_sub(s[2 * rounds + 3]);
        a = a.wrapping_sub(s[2 * rounds + 2]);
        for i in (1..=rounds).rev() {
            (a, b, c, d) = (d, a, b, c);
            let u = rotate_left(quadratic(d), W::LG_BITS);
            let t = rotate_left(quadratic(b), W::LG_BITS);
            c = rotate_right(c.wrapping_sub(s[2 * i + 1]), t.rotation()) ^ u;
            a = rotate_right(a.wrapping_sub(s[2 * i]), u.rotation()) ^ t;
        }
        d = d.wrapping_sub(s[1]);
        b = b.wrapping_sub(s[0]);

        *block = [a, b, c, d];
    }
}

/// `x * (2x + 1) mod 2^w`.
#[inline]
fn quadratic<W: Word>(x: W) -> W {
    x.wrapping_mul(x.wrapping_add(x).wrapping_add(W::from_u32(1)))
}

// =============================================================================
// BYTE INTERFACE
// =============================================================================

fn load_block<W: Word>(bytes: &[u8]) -> [W; 4] {
    let mut words = [W::ZERO; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(W::BYTES)) {
        *word = W::load_le(chunk);
    }
    words
}

fn store_block<W: Word>(words: &[W; 4], out: &mut [u8]) {
    for (word, chunk) in words.iter().zip(out.chunks_exact_mut(W::BYTES)) {
        word.store_le(chunk);
    }
}

impl<W: Word> BlockCipher for Rc6<W> {
    type Schedule = KeySchedule<W>;

    fn block_size(&self) -> usize {
        4 * W::BYTES
    }

    fn expand_key(&self, key: &[u8]) -> Result<Self::Schedule> {
        self.key_schedule(key)
    }

    fn encrypt_block_with(&self, schedule: &Self::Schedule, block: &mut [u8]) {
        let block = &mut block[..4 * W::BYTES];
        let mut words = load_block::<W>(block);
        Self::encrypt_words_with(schedule, &mut words);
        store_block(&words, block);
        words.zeroize();
    }

    fn decrypt_block_with(&self, schedule: &Self::Schedule, block: &mut [u8]) {
        let block = &mut block[..4 * W::BYTES];
        let mut words = load_block::<W>(block);
        Self::decrypt_words_with(schedule, &mut words);
        store_block(&words, block);
        words.zeroize();
    }
}
