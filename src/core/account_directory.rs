//! Account lookup helpers
//!
//! This module provides the `AccountDirectory`, a borrowed view over a loaded
//! account collection. The ledger keeps accounts in a plain `Vec` so that the
//! persisted order is preserved; the directory answers the lookups the
//! ledger operations need without building any index.

use crate::types::Account;

/// Read-only lookups over an account collection
///
/// All methods are pure and preserve the input order of the collection.
#[derive(Debug, Clone, Copy)]
pub struct AccountDirectory<'a> {
    accounts: &'a [Account],
}

impl<'a> AccountDirectory<'a> {
    /// Create a directory over the given accounts
    pub fn new(accounts: &'a [Account]) -> Self {
        AccountDirectory { accounts }
    }

    /// Find an account by its internal id
    pub fn find_by_internal_id(&self, id: &str) -> Option<&'a Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Find the position of an account by its internal id
    pub fn find_index_by_internal_id(&self, id: &str) -> Option<usize> {
        self.accounts.iter().position(|account| account.id == id)
    }

    /// Check whether any account uses the given internal id
    pub fn exists_by_internal_id(&self, id: &str) -> bool {
        self.find_index_by_internal_id(id).is_some()
    }

    /// Check whether any account uses the given external id
    pub fn exists_by_external_id(&self, external_id: &str) -> bool {
        self.accounts
            .iter()
            .any(|account| account.external_id == external_id)
    }
}
