// HTTP transport for the ledger node

mod message;
mod routes;
mod node;

pub use message::{
    ChainResponse, ErrorResponse, LastBlockResponse, MessageResponse, MineRequest, MineResponse,
    NewTransferRequest,
};
pub use routes::{build_router, ApiError, AppState};
pub use node::{generate_node_id, Node};
