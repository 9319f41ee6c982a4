// Ledger node - owns the shared state and serves it over HTTP

use crate::config::NodeConfig;
use crate::consensus::MiningCoordinator;
use crate::ledger::{shared, Ledger, SharedLedger};
use crate::network::{build_router, AppState};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Random 128-bit identifier for this node, as 32 lowercase hex chars
pub fn generate_node_id() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

/// Ledger node
pub struct Node {
    /// Listen address
    pub addr: SocketAddr,
    state: AppState,
}

impl Node {
    /// Create a node with a fresh ledger
    pub fn new(config: &NodeConfig) -> Self {
        let ledger = shared(Ledger::new());
        let coordinator = MiningCoordinator::new(ledger, config.proof_of_work());

        Self {
            addr: config.bind,
            state: AppState::new(coordinator, generate_node_id()),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.state.node_id
    }

    pub fn ledger(&self) -> &SharedLedger {
        self.state.coordinator.ledger()
    }

    /// Router serving this node's state
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Serve requests until the process is stopped
    pub async fn listen(&self) -> Result<(), String> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| format!("Failed to bind {}: {}", self.addr, e))?;

        log::info!(
            "Node {} listening on {} (difficulty {})",
            self.node_id(),
            self.addr,
            self.state.coordinator.proof_of_work().difficulty()
        );

        axum::serve(listener, self.router())
            .await
            .map_err(|e| format!("Server error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_format() {
        let id = generate_node_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(id, generate_node_id());
    }

    #[tokio::test]
    async fn test_node_creation() {
        let config = NodeConfig::default();
        let node = Node::new(&config);

        assert_eq!(node.addr, config.bind);
        assert_eq!(node.node_id().len(), 32);
        assert_eq!(node.ledger().read().await.len(), 1);
    }
}
