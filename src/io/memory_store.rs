//! In-memory record store
//!
//! Keeps the account collection in a mutex-protected `Vec`. Useful for tests
//! and benchmarks, and for embedding the ledger without a data file. It
//! implements both [`RecordStore`] and [`AsyncRecordStore`]; the async
//! methods complete immediately.

use crate::core::traits::{AsyncRecordStore, RecordStore};
use crate::types::{Account, LedgerError};
use std::future::{self, Future};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    accounts: Mutex<Vec<Account>>,
    replaces: AtomicUsize,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `accounts`
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            replaces: AtomicUsize::new(0),
        }
    }

    /// Copy of the currently stored collection
    pub fn snapshot(&self) -> Vec<Account> {
        self.lock().clone()
    }

    /// Number of successful replace calls so far
    pub fn replace_count(&self) -> usize {
        self.replaces.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.snapshot())
    }

    fn replace(&self, accounts: &[Account]) -> Result<(), LedgerError> {
        *self.lock() = accounts.to_vec();
        self.replaces.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl AsyncRecordStore for MemoryRecordStore {
    fn load(&self) -> impl Future<Output = Result<Vec<Account>, LedgerError>> + Send {
        future::ready(RecordStore::load(self))
    }

    fn replace(&self, accounts: &[Account]) -> impl Future<Output = Result<(), LedgerError>> + Send {
        future::ready(RecordStore::replace(self, accounts))
    }
}
