//! Transfer Core Types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::state::TransferStatus;
use crate::core_types::{AccountId, TransferId};
use crate::error::LedgerError;

/// Transfer request from the API layer (not stored)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source_account_id: AccountId,
    pub destination_account_id: AccountId,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        source_account_id: impl Into<AccountId>,
        destination_account_id: impl Into<AccountId>,
        amount: Decimal,
    ) -> Self {
        Self {
            source_account_id: source_account_id.into(),
            destination_account_id: destination_account_id.into(),
            amount,
        }
    }

    /// Amount is checked before the account pair.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        if self.source_account_id == self.destination_account_id {
            return Err(LedgerError::SameAccount);
        }

        Ok(())
    }
}

/// Immutable part of a transfer, fixed at append time
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransferDescriptor {
    pub source_account_id: AccountId,
    pub destination_account_id: AccountId,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Stored ledger entry. Transitions install a new record rather than
/// mutating fields in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransferRecord {
    pub descriptor: TransferDescriptor,
    pub status: TransferStatus,
    pub comment: String,
}

impl TransferRecord {
    pub fn new(request: TransferRequest, timestamp: DateTime<Utc>) -> Self {
        Self {
            descriptor: TransferDescriptor {
                source_account_id: request.source_account_id,
                destination_account_id: request.destination_account_id,
                amount: request.amount,
                timestamp,
            },
            status: TransferStatus::New,
            comment: String::new(),
        }
    }

    pub fn with_status(&self, status: TransferStatus, comment: impl Into<String>) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            status,
            comment: comment.into(),
        }
    }

    pub fn to_transfer(&self, id: TransferId) -> Transfer {
        Transfer {
            id,
            timestamp: self.descriptor.timestamp,
            source_account_id: self.descriptor.source_account_id.clone(),
            destination_account_id: self.descriptor.destination_account_id.clone(),
            amount: self.descriptor.amount,
            status: self.status,
            comment: self.comment.clone(),
        }
    }
}

/// Public view of a transfer attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: TransferId,
    pub timestamp: DateTime<Utc>,
    pub source_account_id: AccountId,
    pub destination_account_id: AccountId,
    pub amount: Decimal,
    pub status: TransferStatus,
    pub comment: String,
}
