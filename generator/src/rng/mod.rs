//! Deterministic random number generation
//!
//! ISAAC-64 word generator plus the checkpoint layer for saving and
//! restoring generator state. CRITICAL: every consumer that needs
//! reproducible runs must draw all of its randomness through one
//! [`Isaac64Rng`] instance per logical stream.

mod checkpoint;
mod isaac64;

pub use checkpoint::{CheckpointError, RngSnapshot};
pub use isaac64::{Isaac64Rng, BLOCK_WORDS};
