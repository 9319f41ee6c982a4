// Proof-of-work ledger node
//
// An append-only chain of blocks that admits a new block only when a
// submitted proof solves the puzzle for the current tip.

pub mod core;
pub mod consensus;
pub mod ledger;
pub mod network;
pub mod config;
pub mod cli;

// Re-exports for convenience
pub use crate::core::{Block, PreviousHash, Transfer, digest};
pub use consensus::{Miner, MiningCoordinator, MiningError, ProofOfWork};
pub use ledger::{Ledger, LedgerError, SharedLedger, TransactionPool};
pub use network::{ApiError, Node};
pub use config::{ConfigError, NodeConfig};
pub use cli::{Cli, CliHandler};
