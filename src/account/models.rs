//! Data models for account management

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core_types::AccountId;
use crate::error::LedgerError;

/// Point-in-time copy of an account record
///
/// Records handed out by the registry are detached snapshots; mutating one
/// has no effect on the stored balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub balance: Decimal,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, balance: Decimal) -> Self {
        Self {
            id: id.into(),
            balance,
        }
    }
}

/// Request to open a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub initial_balance: Decimal,
}

impl CreateAccountRequest {
    pub fn new(initial_balance: Decimal) -> Self {
        Self { initial_balance }
    }

    /// A negative opening balance is rejected with `InvalidBalance`.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.initial_balance.is_sign_negative() && !self.initial_balance.is_zero() {
            return Err(LedgerError::InvalidBalance);
        }
        Ok(())
    }
}
