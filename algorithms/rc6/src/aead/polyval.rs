//! Polyval Universal Hash
//!
//! Absorbs 16-byte blocks as `S = (S + X) * H` in GF(2^128). A trailing
//! partial block is zero-padded.

use core::fmt;
use zeroize::Zeroize;

use crate::aead::field::FieldElement;
use crate::types::FIELD_BLOCK_SIZE;

/// Polyval accumulator keyed by `H`.
#[derive(Clone)]
pub struct Polyval {
    h: FieldElement,
    s: FieldElement,
}

impl Polyval {
    /// Start from a zero accumulator with hash key `h`.
    pub const fn new(h: &[u8; FIELD_BLOCK_SIZE]) -> Self {
        Self {
            h: FieldElement::from_bytes(h),
            s: FieldElement::ZERO,
        }
    }

    /// Resume from an existing accumulator.
    pub const fn with_state(h: FieldElement, s: FieldElement) -> Self {
        Self { h, s }
    }

    /// Absorb one field element.
    pub fn update_block(&mut self, block: FieldElement) {
        self.s = (self.s + block) * self.h;
    }

    /// Absorb `data` in 16-byte blocks, zero-padding the last one.
    pub fn update(&mut self, data: &[u8]) {
        let mut blocks = data.chunks_exact(FIELD_BLOCK_SIZE);
        for chunk in blocks.by_ref() {
            if let Ok(block) = <&[u8; FIELD_BLOCK_SIZE]>::try_from(chunk) {
                self.update_block(FieldElement::from_bytes(block));
            }
        }

        let rest = blocks.remainder();
        if !rest.is_empty() {
            let mut padded = [0u8; FIELD_BLOCK_SIZE];
            padded[..rest.len()].copy_from_slice(rest);
            self.update_block(FieldElement::from_bytes(&padded));
            padded.zeroize();
        }
    }

    /// Current accumulator as 16 little-endian bytes.
    pub fn digest(&self) -> [u8; FIELD_BLOCK_SIZE] {
        self.s.to_bytes()
    }

    /// Clear the accumulator, keeping the key.
    pub const fn reset(&mut self) {
        self.s = FieldElement::ZERO;
    }
}

impl Drop for Polyval {
    fn drop(&mut self) {
        self.h.zeroize();
        self.s.zeroize();
    }
}

impl fmt::Debug for Polyval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polyval").finish_non_exhaustive()
    }
}
