// Mining coordinator: turns an accepted proof into a new block

use crate::consensus::ProofOfWork;
use crate::core::{sha256_hex, Block, PreviousHash};
use crate::ledger::{Ledger, LedgerError, SharedLedger};
use thiserror::Error;

/// Sender of the reward transfer credited to a successful miner
pub const REWARD_SENDER: &str = "server";

/// Reasons a mining submission is turned down. None of them change state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MiningError {
    /// Proof or miner identifier missing
    #[error("invalid submission: requires proof and miner id")]
    MalformedRequest,
    /// Proof does not solve the puzzle for the current tip. It may never
    /// have been valid, or it was valid for a tip that has since moved on.
    #[error("proof does not solve the puzzle for the current tip")]
    StaleOrInvalidProof,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Serializes mining submissions against a shared ledger
#[derive(Clone)]
pub struct MiningCoordinator {
    ledger: SharedLedger,
    pow: ProofOfWork,
}

impl MiningCoordinator {
    pub fn new(ledger: SharedLedger, pow: ProofOfWork) -> Self {
        Self { ledger, pow }
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    pub fn proof_of_work(&self) -> ProofOfWork {
        self.pow
    }

    /// Handle one submission.
    ///
    /// The write lock is held from reading the tip until the new block is
    /// appended, so two submissions against the same tip cannot both win.
    pub async fn submit(
        &self,
        proof: Option<u64>,
        miner_id: Option<&str>,
    ) -> Result<Block, MiningError> {
        let (proof, miner_id) = check_submission(proof, miner_id)?;

        let mut ledger = self.ledger.write().await;
        submit_locked(&mut ledger, &self.pow, proof, miner_id)
    }
}

fn check_submission(
    proof: Option<u64>,
    miner_id: Option<&str>,
) -> Result<(u64, &str), MiningError> {
    match (proof, miner_id) {
        (Some(proof), Some(id)) if !id.is_empty() => Ok((proof, id)),
        _ => Err(MiningError::MalformedRequest),
    }
}

/// Validate `proof` against the tip of an already-locked ledger and, if it
/// solves the puzzle, credit `miner_id` and append the new block.
pub fn submit_locked(
    ledger: &mut Ledger,
    pow: &ProofOfWork,
    proof: u64,
    miner_id: &str,
) -> Result<Block, MiningError> {
    let tip_string = ledger.tip()?.canonical_string();

    if !pow.is_valid(&tip_string, proof) {
        log::warn!("Rejected proof {} from {} at height {}", proof, miner_id, ledger.len());
        return Err(MiningError::StaleOrInvalidProof);
    }

    let previous_hash = PreviousHash::Digest(sha256_hex(tip_string.as_bytes()));
    ledger.add_transfer(REWARD_SENDER, miner_id);
    let block = ledger.append(proof, Some(previous_hash))?;

    log::info!(
        "New block {} forged by {} with {} transfers",
        block.index,
        miner_id,
        block.transactions.len()
    );

    Ok(block)
}
