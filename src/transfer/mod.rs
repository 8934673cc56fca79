//! Transfers
//!
//! The append-only transfer ledger and the coordinator that moves funds
//! between two accounts.
//!
//! # Safety Invariants
//!
//! 1. **Validate-Before-Record**: invalid requests never reach the ledger
//! 2. **Record-Before-Move**: the NEW entry exists before any balance changes
//! 3. **Exact Refund**: a failed credit refunds the source by the debited amount,
//!    which stays held until then so the refund always fits
//! 4. **Finalize-Once**: each entry leaves NEW exactly once

pub mod coordinator;
pub mod ledger;
pub mod state;
pub mod types;

mod integration_tests;

// Re-exports for convenience
pub use coordinator::TransferCoordinator;
pub use ledger::{TransferLedger, TransferStore};
pub use state::TransferStatus;
pub use types::{Transfer, TransferRequest};
