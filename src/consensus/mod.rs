// Consensus logic: the puzzle and the mining state transition

pub mod pow;
pub mod mining;

pub use pow::{Miner, MiningResult, ProofOfWork, DEFAULT_DIFFICULTY, MAX_DIFFICULTY, guess_hash, valid_proof};
pub use mining::{MiningCoordinator, MiningError, REWARD_SENDER, submit_locked};
