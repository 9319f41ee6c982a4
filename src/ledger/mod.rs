// Ledger state: the chain of blocks and the pool of pending transfers

mod chain;
mod pool;

pub use chain::{Ledger, LedgerError};
pub use pool::TransactionPool;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Ledger handle shared between the mining path and request handlers.
///
/// Writers hold the lock for a whole validate-then-append sequence.
pub type SharedLedger = Arc<RwLock<Ledger>>;

/// Wrap a ledger for sharing
pub fn shared(ledger: Ledger) -> SharedLedger {
    Arc::new(RwLock::new(ledger))
}
