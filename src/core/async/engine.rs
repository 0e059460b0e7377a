//! Asynchronous ledger engine
//!
//! This module provides the `AsyncLedgerEngine`, the async counterpart of
//! [`LedgerEngine`](crate::core::LedgerEngine). It runs the same pure ledger
//! operations, but loads and replaces the collection through an
//! [`AsyncRecordStore`] and serializes cycles with a `tokio::sync::Mutex`
//! so the gate can be held across `.await` points.
//!
//! # Thread Safety
//!
//! The engine is `Send + Sync` and is meant to be wrapped in an `Arc` and
//! shared across tasks. Calls from different tasks queue on the gate in
//! FIFO order; at most one load-mutate-replace cycle is in flight at a time.

use crate::core::operations::{self, Mutation, TransferReceipt};
use crate::core::traits::AsyncRecordStore;
use crate::types::{
    Account, Amount, CreateAccountRequest, DepositRequest, LedgerError, SetCreditRequest,
    TransferRequest,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Ledger engine over an asynchronous record store
#[derive(Debug)]
pub struct AsyncLedgerEngine<S> {
    store: S,
    gate: Mutex<()>,
}

impl<S: AsyncRecordStore> AsyncLedgerEngine<S> {
    /// Create a new AsyncLedgerEngine over the given store
    pub fn new(store: S) -> Self {
        Self {
            store,
            gate: Mutex::new(()),
        }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return every account
    pub async fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.read("list_accounts", |accounts| Ok(operations::list_accounts(accounts)))
            .await
    }

    /// Look up a single account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has the id.
    pub async fn get_account(&self, id: &str) -> Result<Account, LedgerError> {
        self.read("get_account", |accounts| operations::get_account(accounts, id))
            .await
    }

    pub async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<Account, LedgerError> {
        let account = self
            .mutate("create_account", |accounts| {
                operations::create_account(accounts, request)
            })
            .await?;
        info!(
            id = %account.id,
            external_id = %account.external_id,
            "account created"
        );
        Ok(account)
    }

    pub async fn deposit(&self, request: DepositRequest) -> Result<Account, LedgerError> {
        let account = self
            .mutate("deposit", |accounts| operations::deposit(accounts, request))
            .await?;
        info!(id = %account.id, cash = account.cash, "deposit applied");
        Ok(account)
    }

    pub async fn set_credit(&self, request: SetCreditRequest) -> Result<Account, LedgerError> {
        let account = self
            .mutate("set_credit", |accounts| {
                operations::set_credit(accounts, request)
            })
            .await?;
        info!(id = %account.id, credit = account.credit, "credit updated");
        Ok(account)
    }

    pub async fn transfer(&self, request: TransferRequest) -> Result<TransferReceipt, LedgerError> {
        let amount = request.amount;
        let receipt = self
            .mutate("transfer", |accounts| operations::transfer(accounts, request))
            .await?;
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

    pub async fn delete_account(&self, id: &str) -> Result<String, LedgerError> {
        let message = self
            .mutate("delete_account", |accounts| {
                operations::delete_account(accounts, id)
            })
            .await?;
        info!(id, "account deleted");
        Ok(message)
    }

    /// Return every account holding strictly more cash than `threshold`
    pub async fn filter_by_cash(&self, threshold: Amount) -> Result<Vec<Account>, LedgerError> {
        self.read("filter_by_cash", |accounts| {
            operations::filter_by_cash(accounts, threshold)
        })
        .await
    }

    async fn mutate<T, F>(&self, operation: &str, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(Vec<Account>) -> Result<Mutation<T>, LedgerError>,
    {
        let _guard = self.gate.lock().await;
        let accounts = self.store.load().await?;
        debug!(operation, accounts = accounts.len(), "collection loaded");

        let mutation = f(accounts).inspect_err(|e| {
            warn!(operation, error = %e, "request rejected");
        })?;

        self.store.replace(&mutation.accounts).await?;
        debug!(operation, accounts = mutation.accounts.len(), "collection replaced");
        Ok(mutation.value)
    }

    /// Run a read-only operation under the gate
    async fn read<T, F>(&self, operation: &str, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&[Account]) -> Result<T, LedgerError>,
    {
        let _guard = self.gate.lock().await;
        let accounts = self.store.load().await?;
        f(&accounts).inspect_err(|e| {
            debug!(operation, error = %e, "read returned no result");
        })
    }
}
