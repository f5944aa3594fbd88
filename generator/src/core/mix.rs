//! Seed-mixing primitive
//!
//! An eight-word bit-diffusion round applied while expanding seed material
//! into generator memory. Each application combines a subtraction, a fixed
//! shift, an XOR against a neighboring lane, and an addition, per lane, all
//! modulo 2^64.
//!
//! # Determinism
//!
//! The round sequence and the starting constant are fixed by the algorithm.
//! Every pinned output vector in the test suite depends on both being
//! reproduced exactly.

/// Fractional part of the golden ratio in 64-bit fixed point.
///
/// Seed expansion starts from eight copies of this constant.
pub const GOLDEN_RATIO: u64 = 0x9e37_79b9_7f4a_7c13;

/// Diffuse eight lanes in place.
///
/// One call runs the fixed eight-round sequence, one round per lane. All
/// arithmetic wraps mod 2^64; the shift amounts never change.
///
/// # Example
/// ```
/// use isaac64_core_rs::core::mix::{mix, GOLDEN_RATIO};
///
/// let mut lanes = [GOLDEN_RATIO; 8];
/// mix(&mut lanes);
/// assert_ne!(lanes, [GOLDEN_RATIO; 8]);
/// ```
pub fn mix(lanes: &mut [u64; 8]) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *lanes;

    a = a.wrapping_sub(e); f ^= h >> 9;  h = h.wrapping_add(a);
    b = b.wrapping_sub(f); g ^= a << 9;  a = a.wrapping_add(b);
    c = c.wrapping_sub(g); h ^= b >> 23; b = b.wrapping_add(c);
    d = d.wrapping_sub(h); a ^= c << 15; c = c.wrapping_add(d);
    e = e.wrapping_sub(a); b ^= d >> 14; d = d.wrapping_add(e);
    f = f.wrapping_sub(b); c ^= e << 20; e = e.wrapping_add(f);
    g = g.wrapping_sub(c); d ^= f >> 17; f = f.wrapping_add(g);
    h = h.wrapping_sub(d); e ^= g << 14; g = g.wrapping_add(h);

    *lanes = [a, b, c, d, e, f, g, h];
}
