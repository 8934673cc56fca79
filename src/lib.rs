//! Money Transfers - in-memory account ledger
//!
//! Accounts hold non-negative decimal balances; transfers move funds between
//! two accounts and are recorded in an append-only ledger with a terminal
//! ACCEPTED or REJECTED status.
//!
//! # Modules
//!
//! - [`core_types`] - Identifier types (AccountId, TransferId)
//! - [`error`] - Business error enum
//! - [`account`] - Account registry with atomic balance updates
//! - [`transfer`] - Transfer ledger and coordinator
//! - [`service`] - The operations exposed to the transport layer
//! - [`gateway`] - HTTP transport
//! - [`config`] - YAML configuration
//! - [`logging`] - Tracing setup

// Core types - must be first!
pub mod core_types;
pub mod error;

// Ledger components
pub mod account;
pub mod service;
pub mod transfer;

// Outer surfaces
pub mod config;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use account::{Account, AccountRegistry, AccountStore, CreateAccountRequest};
pub use core_types::{AccountId, TransferId};
pub use error::LedgerError;
pub use service::Service;
pub use transfer::{
    Transfer, TransferCoordinator, TransferLedger, TransferRequest, TransferStatus, TransferStore,
};
