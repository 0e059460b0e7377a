//! Core traits for account persistence
//!
//! This module defines the record store abstractions that allow both the
//! blocking and the asynchronous engine to run against any backing store:
//! a flat file, a tokio-backed flat file, or an in-memory collection.

use crate::types::{Account, LedgerError};
use std::future::Future;

/// Trait for whole-collection account persistence
///
/// There are no partial writes: every mutation replaces the entire
/// collection, so a store only needs to be able to hand out the current
/// collection and to swap it for a new one.
pub trait RecordStore: Send + Sync {
    /// Load the full account collection
    ///
    /// A store with no backing data yet must behave as if it held an empty
    /// collection.
    fn load(&self) -> Result<Vec<Account>, LedgerError>;

    /// Replace the full account collection
    fn replace(&self, accounts: &[Account]) -> Result<(), LedgerError>;
}

/// Asynchronous counterpart of [`RecordStore`]
///
/// Futures are required to be `Send` so the async engine can be driven from
/// a multi-threaded runtime.
pub trait AsyncRecordStore: Send + Sync {
    /// Load the full account collection
    fn load(&self) -> impl Future<Output = Result<Vec<Account>, LedgerError>> + Send;

    /// Replace the full account collection
    fn replace(&self, accounts: &[Account])
        -> impl Future<Output = Result<(), LedgerError>> + Send;
}
