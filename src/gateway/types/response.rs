//! API response types and the error-to-status mapping table
//!
//! Successful mutations answer `"OK"`; failures answer the error
//! description as a JSON string with the mapped status code.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::LedgerError;

/// Body returned by successful mutations
pub const OK_BODY: &str = "OK";

/// Non-standard client-error status for `InsufficientFunds`
pub const INSUFFICIENT_FUNDS_STATUS: u16 = 460;

/// Transport status for each business error
pub fn status_code(e: &LedgerError) -> StatusCode {
    match e {
        LedgerError::AccountNotFound(_) => StatusCode::NOT_FOUND,
        LedgerError::InsufficientFunds => {
            StatusCode::from_u16(INSUFFICIENT_FUNDS_STATUS).unwrap_or(StatusCode::BAD_REQUEST)
        }
        LedgerError::InvalidAmount
        | LedgerError::SameAccount
        | LedgerError::InvalidBalance
        | LedgerError::BalanceOverflow => StatusCode::BAD_REQUEST,
    }
}

/// Transport-level error: status code plus description body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub description: String,
}

impl ApiError {
    pub fn new(status: StatusCode, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        Self::new(status_code(&e), e.description())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.description)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[inline]
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}
