//! Checkpoint - Save/Restore Generator State
//!
//! Enables serialization and deserialization of the complete generator
//! state for pause/resume functionality.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored generator continues the exact word stream
//!   the original would have produced
//! - **Completeness**: the snapshot carries all 515 state words plus the
//!   output cursor; nothing is reconstructed from a seed
//! - **Integrity**: a SHA-256 digest over the raw state is stored in the
//!   snapshot and re-verified on restore

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::rng::isaac64::{Isaac64Rng, BLOCK_WORDS};

/// Errors that can occur while restoring a snapshot
#[derive(Debug, Error, PartialEq)]
pub enum CheckpointError {
    #[error("Snapshot {field} holds {actual} words, expected {expected}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Snapshot cursor {0} exceeds the block size")]
    CursorOutOfRange(usize),

    #[error("Snapshot digest mismatch: stored {stored}, computed {computed}")]
    DigestMismatch { stored: String, computed: String },

    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),
}

/// Complete generator state snapshot
///
/// Captures everything needed to resume the word stream from an arbitrary
/// point: the memory and result arrays, the three accumulators, and how
/// many words of the current block remain unconsumed.
///
/// # Example
/// ```
/// use isaac64_core_rs::Isaac64Rng;
///
/// let mut rng = Isaac64Rng::new(42);
/// for _ in 0..10 {
///     rng.next_u64();
/// }
///
/// let json = rng.snapshot().to_json().unwrap();
/// // ... persist, then later ...
/// let snapshot = isaac64_core_rs::RngSnapshot::from_json(&json).unwrap();
/// let mut resumed = snapshot.restore().unwrap();
/// assert_eq!(resumed.next_u64(), rng.next_u64());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngSnapshot {
    /// Memory array (exactly 256 words)
    pub memory: Vec<u64>,

    /// Most recent output block (exactly 256 words)
    pub results: Vec<u64>,

    /// Diffusion accumulator
    pub acc_a: u64,

    /// Diffusion accumulator
    pub acc_b: u64,

    /// Block counter
    pub acc_c: u64,

    /// Unconsumed words remaining in the current block
    pub cursor: usize,

    /// SHA256 hash of the state words (for validation)
    pub state_digest: String,
}

impl From<&Isaac64Rng> for RngSnapshot {
    fn from(rng: &Isaac64Rng) -> Self {
        RngSnapshot {
            memory: rng.memory.to_vec(),
            results: rng.results.to_vec(),
            acc_a: rng.acc_a,
            acc_b: rng.acc_b,
            acc_c: rng.acc_c,
            cursor: rng.cursor,
            state_digest: compute_state_digest(
                &rng.memory,
                &rng.results,
                rng.acc_a,
                rng.acc_b,
                rng.acc_c,
                rng.cursor,
            ),
        }
    }
}

impl RngSnapshot {
    /// Rebuild a generator from this snapshot
    ///
    /// Validates array lengths, the cursor bound, and the stored digest
    /// before reconstructing any state.
    pub fn restore(&self) -> Result<Isaac64Rng, CheckpointError> {
        if self.memory.len() != BLOCK_WORDS {
            return Err(CheckpointError::WrongLength {
                field: "memory",
                expected: BLOCK_WORDS,
                actual: self.memory.len(),
            });
        }
        if self.results.len() != BLOCK_WORDS {
            return Err(CheckpointError::WrongLength {
                field: "results",
                expected: BLOCK_WORDS,
                actual: self.results.len(),
            });
        }
        if self.cursor > BLOCK_WORDS {
            return Err(CheckpointError::CursorOutOfRange(self.cursor));
        }

        let computed = compute_state_digest(
            &self.memory,
            &self.results,
            self.acc_a,
            self.acc_b,
            self.acc_c,
            self.cursor,
        );
        if computed != self.state_digest {
            return Err(CheckpointError::DigestMismatch {
                stored: self.state_digest.clone(),
                computed,
            });
        }

        let mut memory = [0u64; BLOCK_WORDS];
        memory.copy_from_slice(&self.memory);
        let mut results = [0u64; BLOCK_WORDS];
        results.copy_from_slice(&self.results);

        Ok(Isaac64Rng::from_raw_parts(
            memory,
            results,
            self.acc_a,
            self.acc_b,
            self.acc_c,
            self.cursor,
        ))
    }

    /// Serialize this snapshot to a JSON string
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self)
            .map_err(|e| CheckpointError::Serialization(format!("Snapshot encoding failed: {}", e)))
    }

    /// Deserialize a snapshot from a JSON string
    ///
    /// The result still carries whatever digest the JSON claimed; call
    /// [`RngSnapshot::restore`] to validate it.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|e| CheckpointError::Serialization(format!("Snapshot decoding failed: {}", e)))
    }
}

/// Compute deterministic SHA256 hash of the raw state words
///
/// Words are fed in little-endian order: memory, results, accumulators,
/// cursor. The layout has no maps or floats, so the byte stream is already
/// canonical.
fn compute_state_digest(
    memory: &[u64],
    results: &[u64],
    acc_a: u64,
    acc_b: u64,
    acc_c: u64,
    cursor: usize,
) -> String {
    let mut hasher = Sha256::new();
    for word in memory.iter().chain(results.iter()) {
        hasher.update(word.to_le_bytes());
    }
    hasher.update(acc_a.to_le_bytes());
    hasher.update(acc_b.to_le_bytes());
    hasher.update(acc_c.to_le_bytes());
    hasher.update((cursor as u64).to_le_bytes());
    format!("{:x}", hasher.finalize())
}
