//! Gateway types module
//!
//! - [`response`]: Response wrapper, `ApiError` and the status mapping table

pub mod response;

pub use response::{ApiError, ApiResult, OK_BODY, ok, status_code};
