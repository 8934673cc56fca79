//! Account registry module
//!
//! In-memory account storage with atomic, invariant-checked balance updates.

pub mod models;
pub mod registry;

// Re-export commonly used types
pub use models::{Account, CreateAccountRequest};
pub use registry::{AccountRegistry, AccountStore};
