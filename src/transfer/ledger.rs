//! Transfer Ledger
//!
//! Append-only log of transfer attempts. Records are keyed by id in a
//! `DashMap`; each status transition locks only its own shard entry, so
//! finalizing one transfer never blocks callers working on another.

use chrono::Utc;
use dashmap::DashMap;
use tracing::error;

use super::state::TransferStatus;
use super::types::{Transfer, TransferRecord, TransferRequest};
use crate::core_types::TransferId;

/// Transfer log operations
pub trait TransferStore: Send + Sync {
    /// Snapshot of all transfers. Callers that need reconciliation order
    /// should sort by `timestamp`.
    fn all(&self) -> Vec<Transfer>;

    fn find(&self, id: &TransferId) -> Option<Transfer>;

    /// Record a new attempt with status NEW. Always succeeds.
    fn append(&self, request: TransferRequest) -> Transfer;

    /// NEW → ACCEPTED, clearing the comment.
    ///
    /// # Panics
    /// If `id` is unknown or the record is already terminal. Both mean the
    /// caller finalized an id this ledger did not just hand out.
    fn accept(&self, id: &TransferId);

    /// NEW → REJECTED with `reason` as comment.
    ///
    /// # Panics
    /// Same contract as [`TransferStore::accept`].
    fn reject(&self, id: &TransferId, reason: &str);
}

/// In-memory transfer ledger
#[derive(Debug, Default)]
pub struct TransferLedger {
    records: DashMap<TransferId, TransferRecord>,
}

impl TransferLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn transition(&self, id: &TransferId, status: TransferStatus, comment: &str) {
        let Some(mut entry) = self.records.get_mut(id) else {
            error!(transfer_id = %id, "Transfer not found in ledger");
            panic!("transfer {} not found in ledger", id);
        };

        if !entry.status.can_transition_to(status) {
            let current = entry.status;
            drop(entry); // Release the shard lock before unwinding
            error!(
                transfer_id = %id,
                from = %current,
                to = %status,
                "Invalid transfer status transition"
            );
            panic!(
                "invalid transition for transfer {}: {} -> {}",
                id, current, status
            );
        }

        let next = entry.with_status(status, comment);
        *entry = next;
    }
}

impl TransferStore for TransferLedger {
    fn all(&self) -> Vec<Transfer> {
        let mut transfers: Vec<Transfer> = self
            .records
            .iter()
            .map(|entry| entry.value().to_transfer(*entry.key()))
            .collect();
        transfers.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        transfers
    }

    fn find(&self, id: &TransferId) -> Option<Transfer> {
        self.records.get(id).map(|record| record.to_transfer(*id))
    }

    fn append(&self, request: TransferRequest) -> Transfer {
        let id = TransferId::new();
        let record = TransferRecord::new(request, Utc::now());
        let transfer = record.to_transfer(id);
        self.records.insert(id, record);
        transfer
    }

    fn accept(&self, id: &TransferId) {
        self.transition(id, TransferStatus::Accepted, "");
    }

    fn reject(&self, id: &TransferId, reason: &str) {
        self.transition(id, TransferStatus::Rejected, reason);
    }
}
