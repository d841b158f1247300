//! GF(2^128) Arithmetic
//!
//! Elements of the Polyval field, `x^128 + x^127 + x^126 + x^121 + 1`, held
//! as two little-endian 64-bit limbs. Multiplication is carry-less and
//! constant time: the 64-bit product uses masked integer multiplies so that
//! no branch or table lookup depends on the operands. It includes the
//! Montgomery factor `x^-128` used by Polyval's `dot` operation.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign};
use zeroize::Zeroize;

use crate::types::FIELD_BLOCK_SIZE;

/// An element of GF(2^128). Addition is XOR, multiplication is Polyval's
/// `dot`.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldElement {
    e0: u64,
    e1: u64,
}

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self { e0: 0, e1: 0 };

    /// Build from limbs. `e0` holds bytes 0..8, `e1` bytes 8..16.
    pub const fn new(e0: u64, e1: u64) -> Self {
        Self { e0, e1 }
    }

    /// Low limb.
    pub const fn low(&self) -> u64 {
        self.e0
    }

    /// High limb.
    pub const fn high(&self) -> u64 {
        self.e1
    }

    /// Read 16 little-endian bytes.
    pub const fn from_bytes(bytes: &[u8; FIELD_BLOCK_SIZE]) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        let mut i = 0;
        while i < 8 {
            lo[i] = bytes[i];
            hi[i] = bytes[i + 8];
            i += 1;
        }
        Self {
            e0: u64::from_le_bytes(lo),
            e1: u64::from_le_bytes(hi),
        }
    }

    /// Read 16 bytes starting at `offset`, or `None` if they run past the end.
    pub fn from_slice(bytes: &[u8], offset: usize) -> Option<Self> {
        let end = offset.checked_add(FIELD_BLOCK_SIZE)?;
        let block: &[u8; FIELD_BLOCK_SIZE] = bytes.get(offset..end)?.try_into().ok()?;
        Some(Self::from_bytes(block))
    }

    /// 16 little-endian bytes.
    pub fn to_bytes(&self) -> [u8; FIELD_BLOCK_SIZE] {
        let mut out = [0u8; FIELD_BLOCK_SIZE];
        out[..8].copy_from_slice(&self.e0.to_le_bytes());
        out[8..].copy_from_slice(&self.e1.to_le_bytes());
        out
    }
}

// =============================================================================
// CARRY-LESS MULTIPLICATION
// =============================================================================

const M0: u64 = 0x1111_1111_1111_1111;
const M1: u64 = 0x2222_2222_2222_2222;
const M2: u64 = 0x4444_4444_4444_4444;
const M3: u64 = 0x8888_8888_8888_8888;

/// Low 64 bits of the carry-less product of `x` and `y`.
///
/// Each operand is split into four interleaved bit lanes so that integer
/// carries fall into lanes that are masked away afterwards.
#[inline]
const fn bmul64(x: u64, y: u64) -> u64 {
    let (x0, x1, x2, x3) = (x & M0, x & M1, x & M2, x & M3);
    let (y0, y1, y2, y3) = (y & M0, y & M1, y & M2, y & M3);

    let z0 = x0.wrapping_mul(y0) ^ x1.wrapping_mul(y3) ^ x2.wrapping_mul(y2) ^ x3.wrapping_mul(y1);
    let z1 = x0.wrapping_mul(y1) ^ x1.wrapping_mul(y0) ^ x2.wrapping_mul(y3) ^ x3.wrapping_mul(y2);
    let z2 = x0.wrapping_mul(y2) ^ x1.wrapping_mul(y1) ^ x2.wrapping_mul(y0) ^ x3.wrapping_mul(y3);
    let z3 = x0.wrapping_mul(y3) ^ x1.wrapping_mul(y2) ^ x2.wrapping_mul(y1) ^ x3.wrapping_mul(y0);

    (z0 & M0) | (z1 & M1) | (z2 & M2) | (z3 & M3)
}

/// High 63 bits of the carry-less product, given bit-reversed operands.
#[inline]
const fn bmul64_high(x_rev: u64, y_rev: u64) -> u64 {
    bmul64(x_rev, y_rev).reverse_bits() >> 1
}

impl Mul for FieldElement {
    type Output = Self;

    /// Karatsuba over 64-bit limbs, then reduction of the 256-bit product.
    fn mul(self, rhs: Self) -> Self {
        let (a0, a1) = (self.e0, self.e1);
        let (b0, b1) = (rhs.e0, rhs.e1);
        let a2 = a0 ^ a1;
        let b2 = b0 ^ b1;

        let (a0r, a1r, a2r) = (a0.reverse_bits(), a1.reverse_bits(), a2.reverse_bits());
        let (b0r, b1r, b2r) = (b0.reverse_bits(), b1.reverse_bits(), b2.reverse_bits());

        // low halves
        let lo0 = bmul64(a0, b0);
        let lo1 = bmul64(a1, b1);
        let lo2 = bmul64(a2, b2) ^ lo0 ^ lo1;

        // high halves
        let hi0 = bmul64_high(a0r, b0r);
        let hi1 = bmul64_high(a1r, b1r);
        let hi2 = bmul64_high(a2r, b2r) ^ hi0 ^ hi1;

        // 256-bit product: z0 + z1 x^64 + z2 x^128 + z3 x^192
        let z0 = lo0;
        let z1 = hi0 ^ lo2;
        let z2 = lo1 ^ hi2;
        let z3 = hi1;

        // fold z0, then z1, into the upper half
        let v1 = z1 ^ (z0 << 63) ^ (z0 << 62) ^ (z0 << 57);
        let v2 = z2 ^ v1 << 63 ^ v1 << 62 ^ v1 << 57 ^ z0 ^ (z0 >> 1) ^ (z0 >> 2) ^ (z0 >> 7);
        let v3 = z3 ^ v1 ^ (v1 >> 1) ^ (v1 >> 2) ^ (v1 >> 7);

        Self { e0: v2, e1: v3 }
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            e0: self.e0 ^ rhs.e0,
            e1: self.e1 ^ rhs.e1,
        }
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.e0.zeroize();
        self.e1.zeroize();
    }
}

impl From<[u8; FIELD_BLOCK_SIZE]> for FieldElement {
    fn from(bytes: [u8; FIELD_BLOCK_SIZE]) -> Self {
        Self::from_bytes(&bytes)
    }
}

impl From<FieldElement> for [u8; FIELD_BLOCK_SIZE] {
    fn from(element: FieldElement) -> Self {
        element.to_bytes()
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self:x})")
    }
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    fn naive_clmul(x: u64, y: u64) -> u128 {
        (0..64)
            .filter(|i| (y >> i) & 1 == 1)
            .fold(0u128, |acc, i| acc ^ (u128::from(x) << i))
    }

    #[test]
    fn test_bmul64_matches_naive() {
        let samples = [
            (0u64, 0u64),
            (1, 1),
            (u64::MAX, u64::MAX),
            (0x8000_0000_0000_0001, 0xFFFF_0000_FFFF_0000),
            (0x0123_4567_89AB_CDEF, 0xFEDC_BA98_7654_3210),
        ];
        for (x, y) in samples {
            let full = naive_clmul(x, y);
            let low = full as u64;
            let high = (full >> 64) as u64;
            assert_eq!(bmul64(x, y), low);
            assert_eq!(bmul64_high(x.reverse_bits(), y.reverse_bits()), high);
        }
    }

    #[test]
    fn test_add_is_xor() {
        let sum = FieldElement::new(1, 1) + FieldElement::new(2, 2);
        assert_eq!(sum, FieldElement::new(3, 3));

        let mut acc = FieldElement::new(0xFF, 0);
        acc += FieldElement::new(0xFF, 0);
        assert_eq!(acc, FieldElement::ZERO);
    }

    #[test]
    fn test_known_product() {
        let product = FieldElement::new(1, 1) * FieldElement::new(2, 2);
        let mut expected = [0u8; 16];
        expected[0] = 0x01;
        expected[14] = 0x08;
        expected[15] = 0xE6;
        assert_eq!(product.to_bytes(), expected);
    }

    #[test]
    fn test_mul_by_zero() {
        let x = FieldElement::new(0xDEAD_BEEF, 0xCAFE_BABE);
        assert_eq!(x * FieldElement::ZERO, FieldElement::ZERO);
        assert_eq!(FieldElement::ZERO * x, FieldElement::ZERO);
    }

    #[test]
    fn test_mul_commutes_and_distributes() {
        let a = FieldElement::new(0x0123_4567_89AB_CDEF, 0x1111_2222_3333_4444);
        let b = FieldElement::new(0xFEDC_BA98_7654_3210, 0x5555_6666_7777_8888);
        let c = FieldElement::new(0x0F0F_0F0F_0F0F_0F0F, 0xA5A5_A5A5_5A5A_5A5A);
        assert_eq!(a * b, b * a);
        assert_eq!(a * (b + c), a * b + a * c);
        assert_eq!((a * b) * c, a * (b * c));
    }

    #[test]
    fn test_byte_conversions() {
        let bytes: [u8; 16] = core::array::from_fn(|i| i as u8);
        let element = FieldElement::from_bytes(&bytes);
        assert_eq!(element.low(), 0x0706_0504_0302_0100);
        assert_eq!(element.high(), 0x0F0E_0D0C_0B0A_0908);
        assert_eq!(element.to_bytes(), bytes);
        assert_eq!(<[u8; 16]>::from(FieldElement::from(bytes)), bytes);
    }

    #[test]
    fn test_from_slice_bounds() {
        let bytes = [7u8; 20];
        assert!(FieldElement::from_slice(&bytes, 4).is_some());
        assert!(FieldElement::from_slice(&bytes, 5).is_none());
        assert!(FieldElement::from_slice(&bytes, usize::MAX).is_none());
    }

    #[test]
    fn test_hex_formatting() {
        let element = FieldElement::new(0x01, 0);
        assert_eq!(format!("{element:x}"), "01000000000000000000000000000000");
        assert!(format!("{element:?}").starts_with("FieldElement(01"));
    }
}
