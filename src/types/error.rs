//! Error types for the ledger service
//!
//! This module defines all error types that can occur while serving a ledger
//! request. Every variant carries enough context to produce a readable
//! message, and [`LedgerError::kind`] classifies it so the request boundary
//! can pick a response status without matching on individual variants.
//!
//! # Error Categories
//!
//! - **Validation Errors**: missing or non-positive input
//! - **Conflict Errors**: duplicate external ids, self-transfers
//! - **Not Found Errors**: unknown accounts, empty filter results
//! - **Funds Errors**: insufficient funds, unreachable settlement state
//! - **Storage Errors**: the backing file cannot be read, decoded or written

use super::account::Amount;
use thiserror::Error;

/// Coarse classification of a [`LedgerError`]
///
/// This is what the request boundary inspects to select a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    InsufficientFunds,
    Transfer,
    StorageRead,
    StorageWrite,
}

/// Main error type for the ledger
///
/// Operations return this instead of partially applying a change: whenever
/// an operation yields an error, the backing store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Missing or invalid request input
    #[error("Validation failed: {message}")]
    Validation {
        /// Description of what was wrong with the input
        message: String,
    },

    /// Another account already uses the requested external id
    #[error("An account with external id '{external_id}' already exists")]
    DuplicateExternalId {
        /// The external id that is already taken
        external_id: String,
    },

    /// Sender and recipient of a transfer are the same account
    #[error("Account {id} cannot transfer to itself")]
    SelfTransfer {
        /// The account id used on both sides
        id: String,
    },

    /// No account has the given internal id
    #[error("Account {id} was not found")]
    AccountNotFound {
        /// The internal id that was looked up
        id: String,
    },

    /// A cash filter matched no accounts
    #[error("No accounts hold more than {threshold} in cash")]
    NoAccountsAboveThreshold {
        /// The exclusive lower bound that was applied
        threshold: Amount,
    },

    /// The sender's cash plus credit does not cover the transfer
    #[error("Insufficient funds for account {id}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Sender account id
        id: String,
        /// Cash plus credit of the sender
        available: Amount,
        /// Requested transfer amount
        requested: Amount,
    },

    /// Neither settlement path could fund the transfer
    ///
    /// Unreachable after the funds check; kept as a terminal failure so the
    /// settlement match is total.
    #[error("Error transferring {amount} from {sender} to {recipient}")]
    TransferFailed {
        sender: String,
        recipient: String,
        amount: Amount,
    },

    /// A balance update would overflow
    #[error("Arithmetic overflow in {operation} for account {id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        id: String,
    },

    /// The backing file could not be read or decoded
    #[error("Failed to read accounts from '{path}': {message}")]
    StorageRead {
        /// Path of the backing file
        path: String,
        /// Description of the underlying failure
        message: String,
    },

    /// The backing file could not be written
    #[error("Failed to write accounts to '{path}': {message}")]
    StorageWrite {
        /// Path of the backing file
        path: String,
        /// Description of the underlying failure
        message: String,
    },
}

impl LedgerError {
    /// Classify this error for the request boundary
    ///
    /// Arithmetic overflow is reported as a validation failure: it can only
    /// be triggered by an out-of-range input amount.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Validation { .. } | LedgerError::ArithmeticOverflow { .. } => {
                ErrorKind::Validation
            }
            LedgerError::DuplicateExternalId { .. } | LedgerError::SelfTransfer { .. } => {
                ErrorKind::Conflict
            }
            LedgerError::AccountNotFound { .. } | LedgerError::NoAccountsAboveThreshold { .. } => {
                ErrorKind::NotFound
            }
            LedgerError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            LedgerError::TransferFailed { .. } => ErrorKind::Transfer,
            LedgerError::StorageRead { .. } => ErrorKind::StorageRead,
            LedgerError::StorageWrite { .. } => ErrorKind::StorageWrite,
        }
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation {
            message: message.into(),
        }
    }

    /// Create a DuplicateExternalId error
    pub fn duplicate_external_id(external_id: &str) -> Self {
        LedgerError::DuplicateExternalId {
            external_id: external_id.to_string(),
        }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(id: &str) -> Self {
        LedgerError::SelfTransfer { id: id.to_string() }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(id: &str) -> Self {
        LedgerError::AccountNotFound { id: id.to_string() }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(id: &str, available: Amount, requested: Amount) -> Self {
        LedgerError::InsufficientFunds {
            id: id.to_string(),
            available,
            requested,
        }
    }

    /// Create a TransferFailed error
    pub fn transfer_failed(sender: &str, recipient: &str, amount: Amount) -> Self {
        LedgerError::TransferFailed {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, id: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            id: id.to_string(),
        }
    }

    /// Create a StorageRead error
    pub fn storage_read(path: &std::path::Path, message: impl Into<String>) -> Self {
        LedgerError::StorageRead {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create a StorageWrite error
    pub fn storage_write(path: &std::path::Path, message: impl Into<String>) -> Self {
        LedgerError::StorageWrite {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}
