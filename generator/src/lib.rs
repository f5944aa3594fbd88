//! ISAAC-64 Core - Deterministic Random Engine
//!
//! Reproducible pseudo-random 64-bit word generation with checkpointing.
//!
//! # Architecture
//!
//! - **core**: seed-mixing primitive and fixed constants
//! - **rng**: the ISAAC-64 generator and its snapshot/restore layer
//!
//! # Critical Invariants
//!
//! 1. Same seed → same infinite word sequence, word for word
//! 2. All state arithmetic wraps mod 2^64 (wraparound is correct behavior)
//! 3. One generator instance per logical stream; `&mut self` on every
//!    advancing operation enforces single-writer access

// Module declarations
pub mod core;
pub mod rng;

// Re-exports for convenience
pub use rng::{CheckpointError, Isaac64Rng, RngSnapshot, BLOCK_WORDS};
