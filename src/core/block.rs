// Block data structures

use crate::core::{digest, to_canonical_string, PreviousHash, Transfer};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Proof carried by the genesis block
pub const GENESIS_PROOF: u64 = 100;

/// A block of transfers sealed by a proof
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain, starting at 1
    pub index: u64,
    /// Creation time in seconds since the Unix epoch
    pub timestamp: f64,
    /// Transfers bundled into this block
    pub transactions: Vec<Transfer>,
    /// Puzzle solution that admitted this block
    pub proof: u64,
    /// Link to the preceding block
    pub previous_hash: PreviousHash,
}

impl Block {
    /// Create a new block stamped with the current time
    pub fn new(
        index: u64,
        transactions: Vec<Transfer>,
        proof: u64,
        previous_hash: PreviousHash,
    ) -> Self {
        Self {
            index,
            timestamp: now_timestamp(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Create the genesis block
    pub fn genesis() -> Self {
        Self::new(1, Vec::new(), GENESIS_PROOF, PreviousHash::genesis())
    }

    /// Canonical string of this block, the input to hashing and to the puzzle
    pub fn canonical_string(&self) -> String {
        // Every field is a string, an integer, a float or a list of those
        to_canonical_string(self).expect("block fields always serialize to JSON")
    }

    /// Get the block digest
    pub fn hash(&self) -> String {
        digest(self)
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_sentinel()
    }
}

/// Wall-clock time as fractional seconds since the Unix epoch
pub fn now_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
