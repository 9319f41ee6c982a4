// Pool of transfers waiting for the next block

use crate::core::Transfer;

/// Pending transfers, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TransactionPool {
    pending: Vec<Transfer>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transfer stamped with today's date
    pub fn add(&mut self, sender: &str, recipient: &str) -> &Transfer {
        self.push(Transfer::today(sender, recipient));
        &self.pending[self.pending.len() - 1]
    }

    /// Queue an already-built transfer
    pub fn push(&mut self, transfer: Transfer) {
        self.pending.push(transfer);
    }

    /// Remove and return every pending transfer, leaving the pool empty
    pub fn drain(&mut self) -> Vec<Transfer> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Transfer] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
