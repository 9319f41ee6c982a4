// Append-only chain of blocks

use crate::core::{Block, PreviousHash, Transfer, GENESIS_PROOF};
use crate::ledger::TransactionPool;
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No block exists yet; cannot happen once the genesis block is in place
    #[error("ledger has no blocks")]
    EmptyLedger,
}

/// The chain plus the pool that feeds it.
///
/// Blocks are only ever appended. Index `i` (1-based) lives at `chain[i - 1]`.
#[derive(Debug, Clone)]
pub struct Ledger {
    chain: Vec<Block>,
    pool: TransactionPool,
}

impl Ledger {
    /// Create a ledger seeded with the genesis block
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pool: TransactionPool::new(),
        };
        ledger.push_block(GENESIS_PROOF, PreviousHash::genesis());
        ledger
    }

    /// Index the next block will receive
    pub fn next_index(&self) -> u64 {
        self.chain.len() as u64 + 1
    }

    /// Queue a transfer for the next block, returning that block's index
    pub fn add_transfer(&mut self, sender: &str, recipient: &str) -> u64 {
        self.pool.add(sender, recipient);
        let index = self.next_index();
        log::debug!(
            "Queued transfer {} -> {} for block {} ({} pending)",
            sender,
            recipient,
            index,
            self.pool.len()
        );
        index
    }

    /// Seal the pool into a new block and append it.
    ///
    /// Without an explicit `previous_hash` the block links to the digest of
    /// the current tip.
    pub fn append(
        &mut self,
        proof: u64,
        previous_hash: Option<PreviousHash>,
    ) -> Result<Block, LedgerError> {
        let previous_hash = match previous_hash {
            Some(hash) => hash,
            None => PreviousHash::Digest(self.tip()?.hash()),
        };
        Ok(self.push_block(proof, previous_hash).clone())
    }

    fn push_block(&mut self, proof: u64, previous_hash: PreviousHash) -> &Block {
        let transactions: Vec<Transfer> = self.pool.drain();
        let block = Block::new(self.next_index(), transactions, proof, previous_hash);
        self.chain.push(block);
        &self.chain[self.chain.len() - 1]
    }

    /// Most recently appended block
    pub fn tip(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyLedger)
    }

    /// Every block, genesis first
    pub fn all(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Transfers waiting for the next block
    pub fn pool(&self) -> &TransactionPool {
        &self.pool
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
