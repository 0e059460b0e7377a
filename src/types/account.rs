//! Account-related types for the ledger service
//!
//! This module defines the Account structure, the only entity the ledger
//! persists, together with the identifier and amount aliases used across
//! the crate.

use serde::{Deserialize, Serialize};

/// Internal account identifier
///
/// Generated by the ledger (UUID v4 in hyphenated form) when an account is
/// created and never changed afterwards.
pub type AccountId = String;

/// Balance and transfer amounts
///
/// Whole currency units. Signed so that invalid (negative) input can be
/// represented and rejected by validation.
pub type Amount = i64;

/// Ledger account state
///
/// Field order matches the column order of the persisted CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// System-generated internal identifier
    pub id: AccountId,

    /// Caller-supplied identifier, unique across all accounts
    pub external_id: String,

    pub first_name: String,

    pub last_name: String,

    /// Immediately available balance
    ///
    /// Never negative: deposits only add to it and transfers never take
    /// more than the sender holds.
    pub cash: Amount,

    /// Remaining credit headroom
    ///
    /// Set directly by the owner and drawn down by transfers once cash is
    /// exhausted.
    pub credit: Amount,
}

impl Account {
    /// Create a new account with zero cash and zero credit
    ///
    /// # Arguments
    ///
    /// * `id` - The internal identifier assigned by the ledger
    /// * `external_id` - The caller-supplied identifier
    /// * `first_name` - Display first name
    /// * `last_name` - Display last name
    pub fn new(
        id: AccountId,
        external_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Account {
            id,
            external_id: external_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            cash: 0,
            credit: 0,
        }
    }

    /// Funds a transfer may draw on: cash plus credit
    ///
    /// Returns `None` if the sum does not fit in an [`Amount`].
    pub fn available_funds(&self) -> Option<Amount> {
        self.cash.checked_add(self.credit)
    }
}
