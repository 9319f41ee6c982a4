// HTTP request and response bodies

use crate::core::Block;
use serde::{Deserialize, Serialize};

/// Body of `POST /mine`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MineRequest {
    pub proof: Option<u64>,
    /// Miner identifier credited with the reward
    pub id: Option<String>,
}

/// Body of `POST /transactions/new`
///
/// `amount` must be present, but it is not carried into the recorded transfer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTransferRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineResponse {
    pub message: String,
    pub block: Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastBlockResponse {
    pub last_block: Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
