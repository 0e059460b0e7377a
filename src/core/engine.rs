//! Ledger engine
//!
//! This module provides the `LedgerEngine` that drives ledger operations
//! against a [`RecordStore`]. Each call runs one complete cycle:
//!
//! 1. take the writer gate
//! 2. load the current collection
//! 3. run the operation on it
//! 4. on success, replace the stored collection and return the value
//!
//! A failing operation returns before step 4, so the store is never touched
//! by a rejected request. Holding the gate for the whole cycle means two
//! concurrent calls cannot both load the same collection and have the second
//! replace silently discard the first.

use crate::core::operations::{self, Mutation, TransferReceipt};
use crate::core::traits::RecordStore;
use crate::types::{
    Account, Amount, CreateAccountRequest, DepositRequest, LedgerError, SetCreditRequest,
    TransferRequest,
};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Ledger engine over a blocking record store
///
/// The engine is `Send + Sync` whenever its store is, so it can be wrapped
/// in an `Arc` and shared between threads; the gate serializes every call.
pub struct LedgerEngine<S> {
    store: S,
    gate: Mutex<()>,
}

impl<S: RecordStore> LedgerEngine<S> {
    /// Create a new LedgerEngine over the given store
    pub fn new(store: S) -> Self {
        LedgerEngine {
            store,
            gate: Mutex::new(()),
        }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return every account
    pub fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.read("list_accounts", |accounts| Ok(operations::list_accounts(accounts)))
    }

    /// Look up a single account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has the id.
    pub fn get_account(&self, id: &str) -> Result<Account, LedgerError> {
        self.read("get_account", |accounts| operations::get_account(accounts, id))
    }

    /// Open a new account
    pub fn create_account(&self, request: CreateAccountRequest) -> Result<Account, LedgerError> {
        let account = self.mutate("create_account", |accounts| {
            operations::create_account(accounts, request)
        })?;
        info!(
            id = %account.id,
            external_id = %account.external_id,
            "account created"
        );
        Ok(account)
    }

    /// Add cash to an account
    pub fn deposit(&self, request: DepositRequest) -> Result<Account, LedgerError> {
        let account = self.mutate("deposit", |accounts| operations::deposit(accounts, request))?;
        info!(id = %account.id, cash = account.cash, "deposit applied");
        Ok(account)
    }

    /// Set an account's credit headroom
    pub fn set_credit(&self, request: SetCreditRequest) -> Result<Account, LedgerError> {
        let account = self.mutate("set_credit", |accounts| {
            operations::set_credit(accounts, request)
        })?;
        info!(id = %account.id, credit = account.credit, "credit updated");
        Ok(account)
    }

    /// Move funds between two accounts
    ///
    /// Both sides are persisted in the same replace, so the store never
    /// holds a state where only one of them has been updated.
    pub fn transfer(&self, request: TransferRequest) -> Result<TransferReceipt, LedgerError> {
        let amount = request.amount;
        let receipt = self.mutate("transfer", |accounts| operations::transfer(accounts, request))?;
        info!(
            sender = %receipt.sender.id,
            recipient = %receipt.recipient.id,
            amount,
            sender_cash = receipt.sender.cash,
            sender_credit = receipt.sender.credit,
            "transfer settled"
        );
        Ok(receipt)
    }

    /// Remove an account
    ///
    /// Returns a confirmation message naming the removed id.
    pub fn delete_account(&self, id: &str) -> Result<String, LedgerError> {
        let message = self.mutate("delete_account", |accounts| {
            operations::delete_account(accounts, id)
        })?;
        info!(id, "account deleted");
        Ok(message)
    }

    /// Return every account holding strictly more cash than `threshold`
    pub fn filter_by_cash(&self, threshold: Amount) -> Result<Vec<Account>, LedgerError> {
        self.read("filter_by_cash", |accounts| {
            operations::filter_by_cash(accounts, threshold)
        })
    }

    /// Run a mutating operation as one load-mutate-replace cycle
    fn mutate<T, F>(&self, operation: &str, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(Vec<Account>) -> Result<Mutation<T>, LedgerError>,
    {
        let _guard = self.lock();
        let accounts = self.store.load()?;
        debug!(operation, accounts = accounts.len(), "collection loaded");

        let mutation = f(accounts).inspect_err(|e| {
            warn!(operation, error = %e, "request rejected");
        })?;

        self.store.replace(&mutation.accounts)?;
        debug!(operation, accounts = mutation.accounts.len(), "collection replaced");
        Ok(mutation.value)
    }

    /// Run a read-only operation under the gate
    fn read<T, F>(&self, operation: &str, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&[Account]) -> Result<T, LedgerError>,
    {
        let _guard = self.lock();
        let accounts = self.store.load()?;
        f(&accounts).inspect_err(|e| {
            debug!(operation, error = %e, "read returned no result");
        })
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // poisoning is harmless: the gate guards no data
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryRecordStore;
    use crate::types::ErrorKind;
    use std::sync::Arc;
    use std::thread;

    fn engine_with(accounts: Vec<Account>) -> LedgerEngine<MemoryRecordStore> {
        LedgerEngine::new(MemoryRecordStore::with_accounts(accounts))
    }

    fn funded(id: &str, cash: Amount, credit: Amount) -> Account {
        Account {
            cash,
            credit,
            ..Account::new(id.to_string(), format!("user-{}", id), "First", "Last")
        }
    }

    fn create(engine: &LedgerEngine<MemoryRecordStore>, external_id: &str) -> Account {
        engine
            .create_account(CreateAccountRequest {
                external_id: Some(external_id.to_string()),
                first_name: Some("First".to_string()),
                last_name: Some("Last".to_string()),
            })
            .unwrap()
    }

    #[test]
    fn test_create_and_get_account() {
        let engine = engine_with(Vec::new());

        let created = create(&engine, "user-1");
        let fetched = engine.get_account(&created.id).unwrap();

        assert_eq!(created, fetched);
        assert_eq!(engine.list_accounts().unwrap(), vec![created]);
    }

    #[test]
    fn test_transfer_is_persisted() {
        let engine = engine_with(vec![funded("a", 50, 20), funded("b", 0, 0)]);

        let receipt = engine
            .transfer(TransferRequest {
                sender_id: "a".to_string(),
                recipient_id: "b".to_string(),
                amount: 60,
            })
            .unwrap();

        assert_eq!(receipt.sender.cash, 0);
        assert_eq!(receipt.sender.credit, 10);
        assert_eq!(receipt.recipient.cash, 60);
        assert_eq!(
            engine.store().snapshot(),
            vec![receipt.sender.clone(), receipt.recipient.clone()]
        );
    }

    #[test]
    fn test_rejected_request_leaves_store_untouched() {
        let accounts = vec![funded("a", 50, 20), funded("b", 0, 0)];
        let engine = engine_with(accounts.clone());

        let err = engine
            .transfer(TransferRequest {
                sender_id: "a".to_string(),
                recipient_id: "b".to_string(),
                amount: 100,
            })
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert_eq!(engine.store().snapshot(), accounts);
        assert_eq!(engine.store().replace_count(), 0);
    }

    #[test]
    fn test_delete_and_filter() {
        let engine = engine_with(vec![funded("a", 5, 0), funded("b", 60, 0)]);

        assert_eq!(engine.filter_by_cash(10).unwrap(), vec![funded("b", 60, 0)]);

        let message = engine.delete_account("b").unwrap();
        assert_eq!(message, "Account with the id of b was deleted");

        let err = engine.filter_by_cash(10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = engine.delete_account("b").unwrap_err();
        assert_eq!(err, LedgerError::account_not_found("b"));
        assert_eq!(engine.list_accounts().unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_deposits_are_not_lost() {
        let engine = Arc::new(engine_with(vec![funded("a", 0, 0)]));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    for _ in 0..25 {
                        engine
                            .deposit(DepositRequest {
                                id: "a".to_string(),
                                amount: Some(1),
                            })
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.get_account("a").unwrap().cash, 200);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LedgerEngine<MemoryRecordStore>>();
    }
}
