//! Request parameter types for ledger operations
//!
//! Fields that a caller may omit are `Option`s so that "missing" and
//! "invalid" input can both be rejected with a validation error by the
//! operation itself, rather than by whatever transport built the request.

use super::account::{AccountId, Amount};

/// Parameters for opening a new account
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccountRequest {
    /// Caller-supplied identifier; must be unique across all accounts
    pub external_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Parameters for adding cash to an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositRequest {
    pub id: AccountId,

    /// Amount to add; required and strictly positive
    pub amount: Option<Amount>,
}

/// Parameters for setting an account's credit headroom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCreditRequest {
    pub id: AccountId,

    /// New absolute credit value; required and strictly positive
    pub credit: Option<Amount>,
}

/// Parameters for moving funds between two accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub sender_id: AccountId,
    pub recipient_id: AccountId,
    pub amount: Amount,
}
