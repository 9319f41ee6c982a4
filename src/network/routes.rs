// HTTP routes for transfers, mining and chain inspection

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::consensus::{MiningCoordinator, MiningError};
use crate::ledger::{LedgerError, SharedLedger};
use crate::network::{
    ChainResponse, ErrorResponse, LastBlockResponse, MessageResponse, MineRequest, MineResponse,
    NewTransferRequest,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub coordinator: MiningCoordinator,
    pub node_id: Arc<str>,
}

impl AppState {
    pub fn new(coordinator: MiningCoordinator, node_id: impl Into<Arc<str>>) -> Self {
        Self {
            coordinator,
            node_id: node_id.into(),
        }
    }

    fn ledger(&self) -> &SharedLedger {
        self.coordinator.ledger()
    }
}

/// Request failures, each reported to the caller without touching the ledger
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid submission. Requires proof and miner_id")]
    MalformedRequest,
    #[error("Proof valid but already submitted")]
    StaleOrInvalidProof,
    #[error("Missing values")]
    MissingFields,
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl From<MiningError> for ApiError {
    fn from(err: MiningError) -> Self {
        match err {
            MiningError::MalformedRequest => ApiError::MalformedRequest,
            MiningError::StaleOrInvalidProof => ApiError::StaleOrInvalidProof,
            MiningError::Ledger(err) => ApiError::Ledger(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let text = self.to_string();
        match self {
            ApiError::MalformedRequest => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: text })).into_response()
            }
            ApiError::StaleOrInvalidProof | ApiError::MissingFields => {
                (StatusCode::BAD_REQUEST, Json(MessageResponse { message: text })).into_response()
            }
            ApiError::Ledger(_) => {
                log::error!("{}", text);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: text }))
                    .into_response()
            }
        }
    }
}

/// Build the node's router with permissive CORS
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/test", get(health))
        .route("/mine", post(mine))
        .route("/last_block", get(last_block))
        .route("/chain", get(full_chain))
        .route("/transactions/new", post(new_transaction))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /test
async fn health() -> Json<&'static str> {
    Json("hello")
}

/// POST /mine
async fn mine(
    State(state): State<AppState>,
    payload: Result<Json<MineRequest>, JsonRejection>,
) -> Result<Json<MineResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        log::debug!("Unreadable mining submission: {}", rejection);
        ApiError::MalformedRequest
    })?;

    let block = state
        .coordinator
        .submit(request.proof, request.id.as_deref())
        .await?;

    Ok(Json(MineResponse {
        message: "New Block Forged".to_string(),
        block,
    }))
}

/// GET /last_block
async fn last_block(State(state): State<AppState>) -> Result<Json<LastBlockResponse>, ApiError> {
    let ledger = state.ledger().read().await;
    let last_block = ledger.tip()?.clone();
    Ok(Json(LastBlockResponse { last_block }))
}

/// GET /chain
async fn full_chain(State(state): State<AppState>) -> Json<ChainResponse> {
    let ledger = state.ledger().read().await;
    Json(ChainResponse {
        chain: ledger.all().to_vec(),
        length: ledger.len(),
    })
}

/// POST /transactions/new
async fn new_transaction(
    State(state): State<AppState>,
    payload: Result<Json<NewTransferRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::MissingFields)?;

    let (sender, recipient, amount) = match (request.sender, request.recipient, request.amount) {
        (Some(sender), Some(recipient), Some(amount)) => (sender, recipient, amount),
        _ => return Err(ApiError::MissingFields),
    };

    // The amount is accepted but never recorded
    log::debug!("Transfer {} -> {} submitted with amount {}", sender, recipient, amount);

    let index = state
        .ledger()
        .write()
        .await
        .add_transfer(&sender, &recipient);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Transaction will be added to block at index {}", index),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            ApiError::from(MiningError::MalformedRequest),
            ApiError::MalformedRequest
        ));
        assert!(matches!(
            ApiError::from(MiningError::StaleOrInvalidProof),
            ApiError::StaleOrInvalidProof
        ));
        assert!(matches!(
            ApiError::from(MiningError::Ledger(LedgerError::EmptyLedger)),
            ApiError::Ledger(LedgerError::EmptyLedger)
        ));
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::MalformedRequest.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MissingFields.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Ledger(LedgerError::EmptyLedger).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
