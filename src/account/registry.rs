//! Account Registry
//!
//! Owns every account balance. A single reader/writer lock guards the whole
//! map: listings and lookups share it, any mutation takes it exclusively.
//! With one lock there is no lock ordering between accounts to get wrong.
//!
//! Funds withdrawn by an in-flight transfer stay held against the source
//! until the transfer commits or rolls back. Credits are refused if the
//! balance plus the held amount would not be representable, so a rollback
//! always fits.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use tracing::debug;

use super::models::Account;
use crate::core_types::AccountId;
use crate::error::LedgerError;

/// Account storage operations
///
/// Every mutation MUST be atomic per call: no other operation may observe
/// a balance between the checks and the write.
pub trait AccountStore: Send + Sync {
    /// Consistent snapshot of all accounts, in no particular order
    fn all(&self) -> Vec<Account>;

    fn find(&self, id: &str) -> Option<Account>;

    /// Insert a new account under a freshly generated id.
    ///
    /// The caller is responsible for rejecting negative balances first.
    fn create(&self, initial_balance: Decimal) -> AccountId;

    /// Apply `balance += delta` if the account exists and the result is `>= 0`.
    ///
    /// # Errors
    /// - `AccountNotFound(id)` if no such account
    /// - `InsufficientFunds` if the new balance would be negative
    /// - `BalanceOverflow` if the new balance, or the new balance plus any
    ///   held funds, is not representable
    ///
    /// On error the stored balance is unchanged.
    fn update_balance(&self, id: &str, delta: Decimal) -> Result<(), LedgerError>;

    /// Debit `amount` and hold it until `commit` or `rollback`.
    ///
    /// Same checks as `update_balance(id, -amount)`.
    fn withdraw(&self, id: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Release a hold once its funds have been credited elsewhere
    fn commit(&self, id: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Return held funds to the balance they were withdrawn from
    fn rollback(&self, id: &str, amount: Decimal) -> Result<(), LedgerError>;
}

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    balance: Decimal,
    held: Decimal,
}

/// In-memory account registry
#[derive(Debug, Default)]
pub struct AccountRegistry {
    records: RwLock<HashMap<AccountId, Entry>>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Critical sections hold no partially applied state, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<AccountId, Entry>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<AccountId, Entry>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_entry<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Entry) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut records = self.write();
        let entry = records
            .get_mut(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))?;
        f(entry)
    }

    /// Sum of all balances and held funds (one consistent snapshot).
    ///
    /// `None` if the sum is not representable.
    pub fn total_balance(&self) -> Option<Decimal> {
        self.read().values().try_fold(Decimal::ZERO, |acc, entry| {
            acc.checked_add(entry.balance)?.checked_add(entry.held)
        })
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl AccountStore for AccountRegistry {
    fn all(&self) -> Vec<Account> {
        self.read()
            .iter()
            .map(|(id, entry)| Account::new(id.clone(), entry.balance))
            .collect()
    }

    fn find(&self, id: &str) -> Option<Account> {
        self.read()
            .get(id)
            .map(|entry| Account::new(id, entry.balance))
    }

    fn create(&self, initial_balance: Decimal) -> AccountId {
        let id = uuid::Uuid::new_v4().to_string();
        let entry = Entry {
            balance: initial_balance,
            held: Decimal::ZERO,
        };
        self.write().insert(id.clone(), entry);
        debug!(account_id = %id, balance = %initial_balance, "Account inserted");
        id
    }

    fn update_balance(&self, id: &str, delta: Decimal) -> Result<(), LedgerError> {
        self.with_entry(id, |entry| {
            let new_balance = entry
                .balance
                .checked_add(delta)
                .ok_or(LedgerError::BalanceOverflow)?;

            if new_balance < Decimal::ZERO {
                return Err(LedgerError::InsufficientFunds);
            }
            // Held funds may return to this balance at any time
            if new_balance.checked_add(entry.held).is_none() {
                return Err(LedgerError::BalanceOverflow);
            }

            entry.balance = new_balance;
            Ok(())
        })
    }

    fn withdraw(&self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        self.with_entry(id, |entry| {
            let new_balance = entry
                .balance
                .checked_sub(amount)
                .ok_or(LedgerError::BalanceOverflow)?;

            if new_balance < Decimal::ZERO {
                return Err(LedgerError::InsufficientFunds);
            }
            let new_held = entry
                .held
                .checked_add(amount)
                .ok_or(LedgerError::BalanceOverflow)?;

            entry.balance = new_balance;
            entry.held = new_held;
            Ok(())
        })
    }

    fn commit(&self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        self.with_entry(id, |entry| {
            debug_assert!(entry.held >= amount, "commit exceeds held funds");
            entry.held -= amount;
            Ok(())
        })
    }

    fn rollback(&self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        self.with_entry(id, |entry| {
            debug_assert!(entry.held >= amount, "rollback exceeds held funds");
            // Fits: credits keep balance + held representable
            let new_balance = entry
                .balance
                .checked_add(amount)
                .ok_or(LedgerError::BalanceOverflow)?;

            entry.balance = new_balance;
            entry.held -= amount;
            Ok(())
        })
    }
}
