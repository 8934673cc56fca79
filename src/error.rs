//! Ledger Error Types
//!
//! Business errors returned by account and transfer operations. These are
//! ordinary values: every one of them is an expected outcome of a request.

use thiserror::Error;

use crate::core_types::AccountId;

/// Ledger error types
///
/// `Display` produces the description recorded as a rejected transfer's
/// comment and returned by the transport layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // === Lookup Errors ===
    #[error("AccountNotFound {0}")]
    AccountNotFound(AccountId),

    // === Validation Errors ===
    #[error("InvalidAmount")]
    InvalidAmount,

    #[error("SameAccount")]
    SameAccount,

    #[error("InvalidBalance")]
    InvalidBalance,

    // === Balance Errors ===
    #[error("InsufficientFunds")]
    InsufficientFunds,

    #[error("BalanceOverflow")]
    BalanceOverflow,
}

impl LedgerError {
    /// Bare variant name, without any payload
    pub fn name(&self) -> &'static str {
        match self {
            LedgerError::AccountNotFound(_) => "AccountNotFound",
            LedgerError::InvalidAmount => "InvalidAmount",
            LedgerError::SameAccount => "SameAccount",
            LedgerError::InvalidBalance => "InvalidBalance",
            LedgerError::InsufficientFunds => "InsufficientFunds",
            LedgerError::BalanceOverflow => "BalanceOverflow",
        }
    }

    /// Full description, including the account id for `AccountNotFound`
    pub fn description(&self) -> String {
        self.to_string()
    }
}
