//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: the Account entity and its id/amount aliases
//! - `request`: typed parameters for ledger operations
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod request;

pub use account::{Account, AccountId, Amount};
pub use error::{ErrorKind, LedgerError};
pub use request::{CreateAccountRequest, DepositRequest, SetCreditRequest, TransferRequest};
