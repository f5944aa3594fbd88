//! ISAAC-64 random number generator
//!
//! A deterministic PRNG that produces an unbounded, reproducible stream of
//! 64-bit words from a 256-word seed.
//!
//! # Algorithm
//!
//! ISAAC-64 keeps a 256-word memory array and two diffusion accumulators,
//! plus a counter that is bumped once per block so the internal permutation
//! cannot cycle with period below 2^64 blocks. Each block step rewrites all
//! of memory and emits 256 fresh output words through a double indirection
//! into memory, which makes recovering the state from observed outputs
//! impractical.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Debugging (reproduce exact runs)
//! - Testing (verify behavior)
//! - Research (validate results)

use std::fmt;

use crate::core::mix::{mix, GOLDEN_RATIO};
use crate::rng::checkpoint::RngSnapshot;

/// Words per block: the size of both the memory array and one output batch.
pub const BLOCK_WORDS: usize = 256;

const BLOCK_WORDS_LOG2: u32 = 8;
const HALF_BLOCK: usize = BLOCK_WORDS / 2;

/// Deterministic random number generator using ISAAC-64
///
/// Owns the entire mutable state of one generator. Every advancing
/// operation takes `&mut self`, so sharing one generator across threads
/// without external synchronization is rejected at compile time; create
/// one generator per thread instead.
///
/// # Example
/// ```
/// use isaac64_core_rs::Isaac64Rng;
///
/// let mut rng = Isaac64Rng::new(12345);
/// let word = rng.next_u64();
/// let amount = rng.range(0, 100); // [0, 100)
/// ```
#[derive(Clone)]
pub struct Isaac64Rng {
    /// Scratch state, fully rewritten on every block generation
    pub(crate) memory: [u64; BLOCK_WORDS],
    /// Most recently generated output block
    pub(crate) results: [u64; BLOCK_WORDS],
    /// Diffusion accumulator carried between blocks
    pub(crate) acc_a: u64,
    /// Diffusion accumulator carried between blocks
    pub(crate) acc_b: u64,
    /// Block counter, incremented once per generation (mod 2^64)
    pub(crate) acc_c: u64,
    /// Unconsumed words remaining in `results`, in [0, 256]
    pub(crate) cursor: usize,
}

impl Isaac64Rng {
    /// Create a generator from a single word of seed material
    ///
    /// The word becomes the first entry of an otherwise zero seed array and
    /// the full two-pass expansion runs over it. Zero is a valid seed and
    /// yields its own fixed sequence.
    ///
    /// # Example
    /// ```
    /// use isaac64_core_rs::Isaac64Rng;
    ///
    /// let mut rng = Isaac64Rng::new(12345);
    /// assert_eq!(rng.next_u64(), 0xe872_1821_7685_22e9);
    /// ```
    pub fn new(seed: u64) -> Self {
        let mut material = [0u64; BLOCK_WORDS];
        material[0] = seed;
        Self::init(&material, true)
    }

    /// Create a generator from a full 256-word seed array
    ///
    /// Every bit pattern is accepted, including all-zero. Expansion makes
    /// two passes over memory so that every seed word influences every
    /// memory word before the first block is generated.
    pub fn from_seed_material(material: [u64; BLOCK_WORDS]) -> Self {
        Self::init(&material, true)
    }

    /// Create the well-known default generator, ignoring all seed material
    ///
    /// The stream depends only on the algorithm's fixed constant, which
    /// makes it the anchor for known-answer tests.
    ///
    /// # Example
    /// ```
    /// use isaac64_core_rs::Isaac64Rng;
    ///
    /// let mut rng = Isaac64Rng::unseeded();
    /// assert_eq!(rng.next_u64(), 0xf67d_fba4_98e4_937c);
    /// ```
    pub fn unseeded() -> Self {
        Self::init(&[0u64; BLOCK_WORDS], false)
    }

    /// Expand seed material into generator memory and produce the first block.
    fn init(material: &[u64; BLOCK_WORDS], use_seed: bool) -> Self {
        let mut memory = [0u64; BLOCK_WORDS];
        let mut lanes = [GOLDEN_RATIO; 8];
        for _ in 0..4 {
            mix(&mut lanes);
        }

        for base in (0..BLOCK_WORDS).step_by(8) {
            if use_seed {
                for (lane, word) in lanes.iter_mut().zip(&material[base..base + 8]) {
                    *lane = lane.wrapping_add(*word);
                }
            }
            mix(&mut lanes);
            memory[base..base + 8].copy_from_slice(&lanes);
        }

        if use_seed {
            // Second pass: without it, late seed words would only influence
            // memory written after them.
            for base in (0..BLOCK_WORDS).step_by(8) {
                for (lane, word) in lanes.iter_mut().zip(&memory[base..base + 8]) {
                    *lane = lane.wrapping_add(*word);
                }
                mix(&mut lanes);
                memory[base..base + 8].copy_from_slice(&lanes);
            }
        }

        let mut rng = Self {
            memory,
            results: [0u64; BLOCK_WORDS],
            acc_a: 0,
            acc_b: 0,
            acc_c: 0,
            cursor: 0,
        };
        rng.generate_block();
        rng.cursor = BLOCK_WORDS;
        rng
    }

    /// Generate next random u64 value
    ///
    /// Serves the current block from its highest index down
    /// (`results[255]` first, `results[0]` last), then transparently
    /// generates a fresh block. The descending order matches the reference
    /// construction, so pinned output vectors apply verbatim.
    ///
    /// # Example
    /// ```
    /// use isaac64_core_rs::Isaac64Rng;
    ///
    /// let mut rng = Isaac64Rng::new(12345);
    /// let value = rng.next_u64();
    /// ```
    pub fn next_u64(&mut self) -> u64 {
        if self.cursor == 0 {
            self.generate_block();
            self.cursor = BLOCK_WORDS;
        }
        self.cursor -= 1;
        self.results[self.cursor]
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use isaac64_core_rs::Isaac64Rng;
    ///
    /// let mut rng = Isaac64Rng::new(12345);
    /// let amount = rng.range(10_000, 100_000);
    /// assert!(amount >= 10_000 && amount < 100_000);
    /// ```
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next_u64();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// Uses the top 53 bits of one output word, so every representable
    /// value is equally likely.
    ///
    /// # Example
    /// ```
    /// use isaac64_core_rs::Isaac64Rng;
    ///
    /// let mut rng = Isaac64Rng::new(12345);
    /// let probability = rng.next_f64();
    /// assert!(probability >= 0.0 && probability < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next_u64();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Fill a buffer with random bytes
    ///
    /// Consumes one output word per eight bytes, little-endian; a trailing
    /// partial chunk consumes a full word and discards the rest.
    pub fn fill_bytes(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    /// Capture the complete generator state for checkpointing/replay
    ///
    /// # Example
    /// ```
    /// use isaac64_core_rs::Isaac64Rng;
    ///
    /// let mut rng = Isaac64Rng::new(12345);
    /// rng.next_u64();
    ///
    /// let snapshot = rng.snapshot();
    /// let mut replay = snapshot.restore().unwrap();
    /// assert_eq!(rng.next_u64(), replay.next_u64());
    /// ```
    pub fn snapshot(&self) -> RngSnapshot {
        RngSnapshot::from(self)
    }

    /// Rebuild a generator from validated snapshot parts.
    pub(crate) fn from_raw_parts(
        memory: [u64; BLOCK_WORDS],
        results: [u64; BLOCK_WORDS],
        acc_a: u64,
        acc_b: u64,
        acc_c: u64,
        cursor: usize,
    ) -> Self {
        Self {
            memory,
            results,
            acc_a,
            acc_b,
            acc_c,
            cursor,
        }
    }

    /// Produce the next 256-word block, rewriting all of memory.
    ///
    /// Does not touch `cursor`; the caller resets it after a full block.
    fn generate_block(&mut self) {
        self.acc_c = self.acc_c.wrapping_add(1);
        let mut a = self.acc_a;
        let mut b = self.acc_b.wrapping_add(self.acc_c);

        for i in 0..BLOCK_WORDS {
            let mixed = match i % 4 {
                0 => !(a ^ (a << 21)),
                1 => a ^ (a >> 5),
                2 => a ^ (a << 12),
                _ => a ^ (a >> 33),
            };

            let x = self.memory[i];
            a = mixed.wrapping_add(self.memory[(i + HALF_BLOCK) % BLOCK_WORDS]);
            let y = self
                .indexed(x)
                .wrapping_add(a)
                .wrapping_add(b);
            self.memory[i] = y;
            b = self.indexed(y >> BLOCK_WORDS_LOG2).wrapping_add(x);
            self.results[i] = b;
        }

        self.acc_a = a;
        self.acc_b = b;
    }

    /// Select a memory word by the middle bits of `value`.
    #[inline]
    fn indexed(&self, value: u64) -> u64 {
        self.memory[((value >> 3) as usize) & (BLOCK_WORDS - 1)]
    }
}

// Debug must not dump the 512 state words; outputs derived from them are
// what embedding applications log.
impl fmt::Debug for Isaac64Rng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Isaac64Rng")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_is_valid() {
        let mut rng = Isaac64Rng::new(0);
        assert_eq!(rng.next_u64(), 0x9d39_247e_3377_6d41);
    }

    #[test]
    fn test_zero_seed_differs_from_unseeded() {
        // new(0) runs the seeding passes over zero material; unseeded()
        // skips them. The streams must not coincide.
        let mut seeded = Isaac64Rng::new(0);
        let mut unseeded = Isaac64Rng::unseeded();
        assert_ne!(seeded.next_u64(), unseeded.next_u64());
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = Isaac64Rng::new(12345);
        rng.range(100, 50); // min > max should panic
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = Isaac64Rng::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                val >= 0.0 && val < 1.0,
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_next_f64_deterministic() {
        let mut rng1 = Isaac64Rng::new(99999);
        let mut rng2 = Isaac64Rng::new(99999);

        for _ in 0..100 {
            let val1 = rng1.next_f64();
            let val2 = rng2.next_f64();
            assert_eq!(val1, val2, "next_f64() not deterministic");
        }
    }

    #[test]
    fn test_fill_bytes_matches_word_stream() {
        let mut rng1 = Isaac64Rng::new(7);
        let mut rng2 = Isaac64Rng::new(7);

        let mut buf = [0u8; 24];
        rng1.fill_bytes(&mut buf);

        let mut expected = [0u8; 24];
        for chunk in expected.chunks_mut(8) {
            chunk.copy_from_slice(&rng2.next_u64().to_le_bytes());
        }
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_fill_bytes_partial_tail() {
        let mut rng1 = Isaac64Rng::new(7);
        let mut rng2 = Isaac64Rng::new(7);

        let mut buf = [0u8; 11];
        rng1.fill_bytes(&mut buf);

        assert_eq!(buf[..8], rng2.next_u64().to_le_bytes());
        assert_eq!(buf[8..], rng2.next_u64().to_le_bytes()[..3]);
    }

    #[test]
    fn test_debug_hides_state() {
        let rng = Isaac64Rng::new(12345);
        let rendered = format!("{:?}", rng);
        assert!(rendered.contains("cursor"));
        assert!(!rendered.contains("memory"));
    }
}
