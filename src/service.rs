//! Transfer Service
//!
//! The four operations exposed to the transport layer. Stores are injected
//! at construction; the service itself holds no mutable state.

use std::sync::Arc;

use tracing::info;

use crate::account::{Account, AccountRegistry, AccountStore, CreateAccountRequest};
use crate::core_types::AccountId;
use crate::error::LedgerError;
use crate::transfer::{Transfer, TransferCoordinator, TransferLedger, TransferRequest, TransferStore};

pub struct Service {
    accounts: Arc<dyn AccountStore>,
    transfers: Arc<dyn TransferStore>,
    coordinator: TransferCoordinator,
}

impl Service {
    pub fn new(accounts: Arc<dyn AccountStore>, transfers: Arc<dyn TransferStore>) -> Self {
        let coordinator = TransferCoordinator::new(accounts.clone(), transfers.clone());
        Self {
            accounts,
            transfers,
            coordinator,
        }
    }

    /// Service backed by fresh in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(AccountRegistry::new()),
            Arc::new(TransferLedger::new()),
        )
    }

    pub fn list_accounts(&self) -> Vec<Account> {
        self.accounts.all()
    }

    pub fn find_account(&self, id: &str) -> Result<Account, LedgerError> {
        self.accounts
            .find(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
    }

    /// Validate and open an account, returning its id.
    ///
    /// # Errors
    /// `InvalidBalance` for a negative opening balance.
    pub fn create_account(&self, request: CreateAccountRequest) -> Result<AccountId, LedgerError> {
        request.validate()?;
        let id = self.accounts.create(request.initial_balance);
        info!(account_id = %id, balance = %request.initial_balance, "Account created");
        Ok(id)
    }

    pub fn list_transfers(&self) -> Vec<Transfer> {
        self.transfers.all()
    }

    pub fn transfer(&self, request: TransferRequest) -> Result<(), LedgerError> {
        self.coordinator.execute(request)
    }
}
