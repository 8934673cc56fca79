//! Account handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use super::super::state::AppState;
use super::super::types::{ApiResult, OK_BODY, ok};
use crate::account::{Account, CreateAccountRequest};

/// GET /accounts
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Account>> {
    ok(state.service.list_accounts())
}

/// GET /accounts/{id}
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Account> {
    ok(state.service.find_account(&id)?)
}

/// POST /accounts
///
/// Body: `{"initialBalance": "100.00"}`
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> ApiResult<&'static str> {
    let Json(req) = payload?;
    state.service.create_account(req)?;
    ok(OK_BODY)
}
