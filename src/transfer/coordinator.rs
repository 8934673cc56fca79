//! Transfer Coordinator
//!
//! Drives a single transfer through validation, the two balance legs,
//! compensation and finalization. It is the only component that touches
//! both the account store and the transfer store, and it holds no mutable
//! state of its own.
//!
//! ```text
//! validate ──✗──▶ return error (no ledger entry)
//!    │
//! append (NEW)
//!    │
//! withdraw source ──✗─────────────────────────▶ reject
//!    │
//! credit destination ──✗──▶ rollback source ──▶ reject
//!    │
//! commit source, accept
//! ```
//!
//! Store calls are strictly sequential: the registry lock is released
//! before any ledger call and vice versa.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::ledger::TransferStore;
use super::types::{Transfer, TransferRequest};
use crate::account::AccountStore;
use crate::error::LedgerError;

/// Transfer Coordinator - orchestrates the two-leg balance movement
pub struct TransferCoordinator {
    accounts: Arc<dyn AccountStore>,
    transfers: Arc<dyn TransferStore>,
}

impl TransferCoordinator {
    pub fn new(accounts: Arc<dyn AccountStore>, transfers: Arc<dyn TransferStore>) -> Self {
        Self {
            accounts,
            transfers,
        }
    }

    /// Execute a transfer to one of its terminal outcomes.
    ///
    /// Invalid requests are refused before anything is recorded. Every other
    /// outcome leaves exactly one ACCEPTED or REJECTED ledger entry.
    ///
    /// # Errors
    /// `InvalidAmount`, `SameAccount`, `AccountNotFound` (either leg),
    /// `InsufficientFunds` (debit leg only), `BalanceOverflow` (credit leg).
    pub fn execute(&self, request: TransferRequest) -> Result<(), LedgerError> {
        request.validate()?;

        let transfer = self.transfers.append(request);
        debug!(
            transfer_id = %transfer.id,
            source = %transfer.source_account_id,
            destination = %transfer.destination_account_id,
            amount = %transfer.amount,
            "Transfer recorded"
        );

        match self.move_funds(&transfer) {
            Ok(()) => {
                self.transfers.accept(&transfer.id);
                info!(transfer_id = %transfer.id, amount = %transfer.amount, "Transfer accepted");
                Ok(())
            }
            Err(e) => {
                let reason = e.description();
                self.transfers.reject(&transfer.id, &reason);
                warn!(transfer_id = %transfer.id, error = %reason, "Transfer rejected");
                Err(e)
            }
        }
    }

    /// Withdraw then credit. The withdrawn amount stays held against the
    /// source until the credit settles, so the refund on a failed credit
    /// always fits.
    fn move_funds(&self, transfer: &Transfer) -> Result<(), LedgerError> {
        let amount = transfer.amount;
        let source = transfer.source_account_id.as_str();
        let destination = transfer.destination_account_id.as_str();

        // amount > 0 is guaranteed by validation
        self.accounts.withdraw(source, amount)?;
        debug!(transfer_id = %transfer.id, account_id = %source, amount = %amount, "Source debited");

        if let Err(e) = self.accounts.update_balance(destination, amount) {
            warn!(
                transfer_id = %transfer.id,
                account_id = %destination,
                error = %e,
                "Credit failed, refunding source"
            );
            self.compensate(transfer, &e);
            return Err(e);
        }
        debug!(transfer_id = %transfer.id, account_id = %destination, amount = %amount, "Destination credited");

        self.settle(transfer);
        Ok(())
    }

    /// # Panics
    /// If the source account disappeared since the withdrawal. The record
    /// is rejected first so it never stays NEW.
    fn compensate(&self, transfer: &Transfer, cause: &LedgerError) {
        let source = transfer.source_account_id.as_str();
        if let Err(e) = self.accounts.rollback(source, transfer.amount) {
            error!(
                transfer_id = %transfer.id,
                account_id = %source,
                amount = %transfer.amount,
                error = %e,
                "Refund of debited source failed"
            );
            self.transfers.reject(&transfer.id, &cause.description());
            panic!(
                "refund of {} to {} for transfer {} failed: {}",
                transfer.amount, source, transfer.id, e
            );
        }
    }

    /// # Panics
    /// If the source account disappeared since the withdrawal. Both legs
    /// have applied, so the record is accepted first.
    fn settle(&self, transfer: &Transfer) {
        let source = transfer.source_account_id.as_str();
        if let Err(e) = self.accounts.commit(source, transfer.amount) {
            error!(
                transfer_id = %transfer.id,
                account_id = %source,
                amount = %transfer.amount,
                error = %e,
                "Release of held funds failed"
            );
            self.transfers.accept(&transfer.id);
            panic!(
                "release of {} held on {} for transfer {} failed: {}",
                transfer.amount, source, transfer.id, e
            );
        }
    }
}
