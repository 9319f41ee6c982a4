// Proof of Work implementation

use crate::core::sha256_hex;
use sha2::{Digest, Sha256};
use std::time::Instant;

/// Leading hex zeros required when nothing else is configured
pub const DEFAULT_DIFFICULTY: usize = 6;

/// A SHA256 hex digest has 64 characters
pub const MAX_DIFFICULTY: usize = 64;

/// Puzzle predicate: `sha256(block_string + proof)` must start with
/// `difficulty` hex zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
}

impl ProofOfWork {
    /// Create a predicate requiring `difficulty` leading hex zeros
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty: difficulty.min(MAX_DIFFICULTY),
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Check whether `proof` solves the puzzle for `block_string`
    pub fn is_valid(&self, block_string: &str, proof: u64) -> bool {
        self.meets_difficulty(&guess_hash(block_string, proof))
    }

    /// Check a hex digest against the zero prefix
    pub fn meets_difficulty(&self, hex_hash: &str) -> bool {
        hex_hash.len() >= self.difficulty
            && hex_hash.bytes().take(self.difficulty).all(|b| b == b'0')
    }

    /// Same check on raw digest bytes (two hex digits per byte)
    #[inline]
    fn meets_difficulty_raw(&self, hash: &[u8]) -> bool {
        let full_bytes = self.difficulty / 2;
        if hash[..full_bytes].iter().any(|b| *b != 0) {
            return false;
        }
        self.difficulty % 2 == 0 || hash[full_bytes] >> 4 == 0
    }
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

/// Hex digest of the puzzle input for one guess
pub fn guess_hash(block_string: &str, proof: u64) -> String {
    sha256_hex(format!("{}{}", block_string, proof).as_bytes())
}

/// Puzzle check at the default difficulty
pub fn valid_proof(block_string: &str, proof: u64) -> bool {
    ProofOfWork::default().is_valid(block_string, proof)
}

/// Proof searcher, the client side of the puzzle
pub struct Miner {
    pub pow: ProofOfWork,
}

impl Miner {
    pub fn new(pow: ProofOfWork) -> Self {
        Self { pow }
    }

    /// Try proofs upward from `start` until one solves the puzzle
    pub fn mine(&self, block_string: &str, start: u64) -> MiningResult {
        let start_time = Instant::now();
        let mut attempts = 0u64;

        // The block string prefix is hashed once and reused for every guess
        let midstate = Sha256::new_with_prefix(block_string.as_bytes());

        for proof in start..=u64::MAX {
            let mut hasher = midstate.clone();
            hasher.update(proof.to_string().as_bytes());
            let hash = hasher.finalize();
            attempts += 1;

            if self.pow.meets_difficulty_raw(&hash) {
                return MiningResult {
                    success: true,
                    proof,
                    hash: hex::encode(hash),
                    attempts,
                    duration: start_time.elapsed(),
                };
            }

            if attempts % 100_000 == 0 {
                let elapsed = start_time.elapsed();
                log::debug!("Mining attempts: {} ({:.1} KH/s)",
                    attempts,
                    attempts as f64 / elapsed.as_secs_f64() / 1000.0
                );
            }
        }

        MiningResult {
            success: false,
            proof: 0,
            hash: String::new(),
            attempts,
            duration: start_time.elapsed(),
        }
    }
}

/// Mining result
#[derive(Debug)]
pub struct MiningResult {
    /// Whether mining succeeded
    pub success: bool,
    /// The proof that was found
    pub proof: u64,
    /// The resulting hex digest
    pub hash: String,
    /// Number of attempts
    pub attempts: u64,
    /// Time taken
    pub duration: std::time::Duration,
}

impl MiningResult {
    /// Calculate hash rate (hashes per second)
    pub fn hash_rate(&self) -> f64 {
        self.attempts as f64 / self.duration.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    // Canonical string of a genesis block with a fixed timestamp
    const GENESIS_STRING: &str =
        r#"{"index": 1, "previous_hash": 1, "proof": 100, "timestamp": 1697461234.25, "transactions": []}"#;

    // Smallest six-zero proof for GENESIS_STRING
    const GENESIS_SOLUTION: u64 = 28_197_473;

    #[test]
    fn test_known_solution_is_valid() {
        let pow = ProofOfWork::default();
        assert!(pow.is_valid(GENESIS_STRING, GENESIS_SOLUTION));
        assert!(valid_proof(GENESIS_STRING, GENESIS_SOLUTION));
        assert_eq!(
            guess_hash(GENESIS_STRING, GENESIS_SOLUTION),
            "000000a2671bfb92bb871a3dc0579acab757a457f47447804fed4549f00e174a"
        );
    }

    #[test]
    fn test_known_non_solutions() {
        let pow = ProofOfWork::default();
        assert!(!pow.is_valid(GENESIS_STRING, 0));
        assert!(!pow.is_valid(GENESIS_STRING, GENESIS_SOLUTION + 1));
        assert_eq!(
            guess_hash(GENESIS_STRING, 0),
            "7fedfc301bc65b414dd4663cff4f84aea49333ab6fb4f67639fa2b7d2773656f"
        );
    }

    #[test]
    fn test_predicate_matches_prefix_for_random_proofs() {
        let pow = ProofOfWork::default();
        let mut rng = rand::thread_rng();

        for _ in 0..1_000 {
            let proof: u64 = rng.gen_range(0..u64::MAX);
            let expected = guess_hash(GENESIS_STRING, proof).starts_with("000000");
            assert_eq!(pow.is_valid(GENESIS_STRING, proof), expected);
        }
    }

    #[test]
    fn test_meets_difficulty() {
        let pow = ProofOfWork::new(3);
        assert!(pow.meets_difficulty("000abc"));
        assert!(pow.meets_difficulty("0000"));
        assert!(!pow.meets_difficulty("00a000"));
        assert!(!pow.meets_difficulty("00"));
    }

    #[test]
    fn test_raw_check_agrees_with_hex_check() {
        for difficulty in 0..=8 {
            let pow = ProofOfWork::new(difficulty);
            for proof in 0..2_000u64 {
                let hex_hash = guess_hash(GENESIS_STRING, proof);
                let raw = hex::decode(&hex_hash).unwrap();
                assert_eq!(pow.meets_difficulty_raw(&raw), pow.meets_difficulty(&hex_hash));
            }
        }
    }

    #[test]
    fn test_difficulty_is_capped() {
        assert_eq!(ProofOfWork::new(100).difficulty(), MAX_DIFFICULTY);
        assert_eq!(ProofOfWork::default().difficulty(), 6);
    }

    #[test]
    fn test_miner_finds_known_solution() {
        let miner = Miner::new(ProofOfWork::default());
        let result = miner.mine(GENESIS_STRING, 28_197_000);

        assert!(result.success);
        assert_eq!(result.proof, GENESIS_SOLUTION);
        assert_eq!(result.attempts, 474);
        assert_eq!(result.hash, guess_hash(GENESIS_STRING, GENESIS_SOLUTION));
    }

    #[test]
    fn test_miner_easy_difficulty() {
        let pow = ProofOfWork::new(3);
        let miner = Miner::new(pow);

        let result = miner.mine("some block", 0);
        assert!(result.success);
        assert!(pow.is_valid("some block", result.proof));
        assert!(result.hash.starts_with("000"));
        println!("Mining took {} attempts in {:?}", result.attempts, result.duration);
    }
}
