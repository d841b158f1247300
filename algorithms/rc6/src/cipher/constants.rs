//! RC6 Magic Constants
//!
//! Both key-schedule constants are binary expansions of irrational numbers,
//! truncated to the word width:
//!
//! ```text
//! P_w = ceil((e - 2) * 2^w)
//! Q_w = floor((phi - 1) * 2^w)
//! ```
//!
//! They are evaluated with integer arithmetic in `const fn`s, so every width
//! gets its pair at compile time without relying on floating point.
//!
//! | w  | P                     | Q                     |
//! |----|-----------------------|-----------------------|
//! | 32 | `0xB7E1_5163`         | `0x9E37_79B9`         |
//! | 64 | `0xB7E1_5162_8AED_2A6B` | `0x9E37_79B9_7F4A_7C15` |

// =============================================================================
// FIXED-POINT EXPANSIONS
// =============================================================================

/// Fractional bits carried while summing the series for e.
const FRACTION_BITS: u32 = 124;

/// Widest word the expansions are precise enough for.
pub const MAX_WORD_BITS: u32 = 64;

/// `(e - 2) * 2^124`, i.e. `sum(1/k!)` for `k >= 2`.
const fn e_minus_two() -> u128 {
    let mut term: u128 = 1 << FRACTION_BITS;
    let mut sum: u128 = 0;
    let mut k: u128 = 1;
    while k < 40 {
        term /= k;
        if k >= 2 {
            sum += term;
        }
        k += 1;
    }
    sum
}

const fn fibonacci(n: u32) -> u128 {
    let (mut a, mut b): (u128, u128) = (0, 1);
    let mut i = 0;
    while i < n {
        let next = a + b;
        a = b;
        b = next;
        i += 1;
    }
    a
}

// =============================================================================
// MAGIC CONSTANTS
// =============================================================================

/// `ceil((e - 2) * 2^bits)`.
///
/// # Panics
/// At compile time if `bits` is 0 or wider than [`MAX_WORD_BITS`].
pub const fn magic_p(bits: u32) -> u128 {
    assert!(bits > 0 && bits <= MAX_WORD_BITS);
    let e = e_minus_two();
    let shift = FRACTION_BITS - bits;
    let floor = e >> shift;
    if e & ((1 << shift) - 1) == 0 {
        floor
    } else {
        floor + 1
    }
}

/// `floor((phi - 1) * 2^bits)`, using `F(92) / F(93)` as the golden-ratio
/// conjugate (error far below `2^-64`).
///
/// # Panics
/// At compile time if `bits` is 0 or wider than [`MAX_WORD_BITS`].
pub const fn magic_q(bits: u32) -> u128 {
    assert!(bits > 0 && bits <= MAX_WORD_BITS);
    (fibonacci(92) << bits) / fibonacci(93)
}
