//! Word Operations
//!
//! The cipher is generic over an unsigned machine word. Everything it needs
//! from that word (wrapping arithmetic, shifts, little-endian load/store and
//! the magic constants) lives on the [`Word`] trait; rotations are free
//! functions on top of it.

use crate::cipher::constants::{magic_p, magic_q};
use core::fmt;
use core::ops::{BitOr, BitXor, Shl, Shr};
use zeroize::Zeroize;

// =============================================================================
// WORD TRAIT
// =============================================================================

/// Unsigned fixed-width integer with wrapping arithmetic.
///
/// Implemented for `u32` (128-bit blocks) and `u64` (256-bit blocks).
pub trait Word:
    Copy
    + Default
    + Eq
    + fmt::Debug
    + fmt::LowerHex
    + Send
    + Sync
    + Zeroize
    + BitXor<Output = Self>
    + BitOr<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + 'static
{
    /// Width in bits.
    const BITS: u32;
    /// Width in bytes.
    const BYTES: usize;
    /// `log2(BITS)`, the fixed rotation of the round function.
    const LG_BITS: u32;
    /// Zero.
    const ZERO: Self;
    /// `ceil((e - 2) * 2^BITS)`.
    const P: Self;
    /// `floor((phi - 1) * 2^BITS)`.
    const Q: Self;

    /// Addition modulo `2^BITS`.
    #[must_use]
    fn wrapping_add(self, rhs: Self) -> Self;
    /// Subtraction modulo `2^BITS`.
    #[must_use]
    fn wrapping_sub(self, rhs: Self) -> Self;
    /// Multiplication modulo `2^BITS`.
    #[must_use]
    fn wrapping_mul(self, rhs: Self) -> Self;
    /// Widen a `u32`.
    fn from_u32(value: u32) -> Self;
    /// Low 32 bits.
    fn low_u32(self) -> u32;
    /// Reverse byte order.
    #[must_use]
    fn swap_bytes(self) -> Self;

    /// Read a word from the first `BYTES` bytes of `bytes`, little-endian.
    ///
    /// # Panics
    /// If `bytes` is shorter than `BYTES`.
    fn load_le(bytes: &[u8]) -> Self;

    /// Write the word into the first `BYTES` bytes of `out`, little-endian.
    ///
    /// # Panics
    /// If `out` is shorter than `BYTES`.
    fn store_le(self, out: &mut [u8]);

    /// Rotation amount encoded by this word: only the low `log2(BITS)` bits count.
    #[inline]
    fn rotation(self) -> u32 {
        self.low_u32() & (Self::BITS - 1)
    }
}

macro_rules! impl_word {
    ($t:ty) => {
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const BYTES: usize = core::mem::size_of::<$t>();
            const LG_BITS: u32 = <$t>::BITS.trailing_zeros();
            const ZERO: Self = 0;
            #[allow(clippy::cast_possible_truncation)]
            const P: Self = magic_p(<$t>::BITS) as $t;
            #[allow(clippy::cast_possible_truncation)]
            const Q: Self = magic_q(<$t>::BITS) as $t;

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn from_u32(value: u32) -> Self {
                Self::from(value)
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn low_u32(self) -> u32 {
                self as u32
            }

            #[inline]
            fn swap_bytes(self) -> Self {
                <$t>::swap_bytes(self)
            }

            #[inline]
            fn load_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; core::mem::size_of::<$t>()];
                buf.copy_from_slice(&bytes[..core::mem::size_of::<$t>()]);
                <$t>::from_le_bytes(buf)
            }

            #[inline]
            fn store_le(self, out: &mut [u8]) {
                out[..core::mem::size_of::<$t>()].copy_from_slice(&self.to_le_bytes());
            }
        }
    };
}

impl_word!(u32);
impl_word!(u64);

// =============================================================================
// ROTATIONS & ENDIANNESS
// =============================================================================

/// Rotate `word` left by `shift` bits, modulo the word width.
#[inline]
#[must_use]
pub fn rotate_left<W: Word>(word: W, shift: u32) -> W {
    let shift = shift & (W::BITS - 1);
    if shift == 0 {
        return word;
    }
    (word << shift) | (word >> (W::BITS - shift))
}

/// Rotate `word` right by `shift` bits, modulo the word width.
#[inline]
#[must_use]
pub fn rotate_right<W: Word>(word: W, shift: u32) -> W {
    let shift = shift & (W::BITS - 1);
    if shift == 0 {
        return word;
    }
    (word >> shift) | (word << (W::BITS - shift))
}

/// Reverse the byte order of a word.
#[inline]
#[must_use]
pub fn byte_swap<W: Word>(word: W) -> W {
    word.swap_bytes()
}

/// Whether the host stores integers most-significant byte first.
///
/// Informational only: all loads and stores go through [`Word::load_le`] /
/// [`Word::store_le`], which are host independent.
#[inline]
pub const fn is_big_endian() -> bool {
    cfg!(target_endian = "big")
}
