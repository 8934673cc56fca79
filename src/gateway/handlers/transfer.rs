//! Transfer handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use super::super::state::AppState;
use super::super::types::{ApiResult, OK_BODY, ok};
use crate::transfer::{Transfer, TransferRequest};

/// GET /transfers
///
/// Sorted by timestamp.
pub async fn list_transfers(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Transfer>> {
    ok(state.service.list_transfers())
}

/// POST /transfers
///
/// Body: `{"sourceAccountId": "...", "destinationAccountId": "...", "amount": "1.5"}`
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> ApiResult<&'static str> {
    let Json(req) = payload?;
    state.service.transfer(req)?;
    ok(OK_BODY)
}
