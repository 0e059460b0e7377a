//! Ledger operations
//!
//! Every operation is a pure function over an exclusively owned copy of the
//! account collection. A successful mutating operation returns a
//! [`Mutation`]: the new collection to persist plus the value to hand back
//! to the caller. A failing operation returns a [`LedgerError`] and the
//! caller persists nothing, so no operation can leave a partial change
//! behind.
//!
//! # Transfers
//!
//! A transfer is settled from one of two paths:
//!
//! - **Pure cash**: the sender's cash covers the amount; only cash moves.
//! - **Blended**: cash is exhausted first and the shortfall is drawn from
//!   the sender's credit.
//!
//! Preconditions are checked in a fixed order (existence, funds,
//! self-transfer, non-empty ids, then amount sign) because the order decides
//! which error a malformed request reports.

use crate::core::account_directory::AccountDirectory;
use crate::types::{
    Account, AccountId, Amount, CreateAccountRequest, DepositRequest, LedgerError,
    SetCreditRequest, TransferRequest,
};
use uuid::Uuid;

/// Result of a successful mutating operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation<T> {
    /// The complete collection to persist
    pub accounts: Vec<Account>,

    /// The value returned to the caller
    pub value: T,
}

impl<T> Mutation<T> {
    fn new(accounts: Vec<Account>, value: T) -> Self {
        Mutation { accounts, value }
    }
}

/// Both sides of a settled transfer, as they are after the transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub sender: Account,
    pub recipient: Account,
}

impl TransferReceipt {
    /// The pair `[sender, recipient]`
    pub fn into_pair(self) -> Vec<Account> {
        vec![self.sender, self.recipient]
    }
}

/// Return every account
pub fn list_accounts(accounts: &[Account]) -> Vec<Account> {
    accounts.to_vec()
}

/// Look up a single account by internal id
pub fn get_account(accounts: &[Account], id: &str) -> Result<Account, LedgerError> {
    AccountDirectory::new(accounts)
        .find_by_internal_id(id)
        .cloned()
        .ok_or_else(|| LedgerError::account_not_found(id))
}

/// Open a new account with zero cash and zero credit
///
/// # Errors
///
/// - `Validation` if the external id, first name or last name is missing or
///   empty
/// - `DuplicateExternalId` if the external id is already in use
pub fn create_account(
    mut accounts: Vec<Account>,
    request: CreateAccountRequest,
) -> Result<Mutation<Account>, LedgerError> {
    let (Some(external_id), Some(first_name), Some(last_name)) = (
        non_empty(request.external_id),
        non_empty(request.first_name),
        non_empty(request.last_name),
    ) else {
        return Err(LedgerError::validation(
            "all fields (external id, first name, last name) are required",
        ));
    };

    let directory = AccountDirectory::new(&accounts);
    if directory.exists_by_external_id(&external_id) {
        return Err(LedgerError::duplicate_external_id(&external_id));
    }

    let id = fresh_id(&directory);
    let account = Account::new(id, external_id, first_name, last_name);
    accounts.push(account.clone());

    Ok(Mutation::new(accounts, account))
}

/// Add cash to an account
///
/// # Errors
///
/// - `Validation` if the id is empty or the amount is missing or not
///   strictly positive
/// - `AccountNotFound` if no account has the id
/// - `ArithmeticOverflow` if the new cash balance does not fit
pub fn deposit(
    mut accounts: Vec<Account>,
    request: DepositRequest,
) -> Result<Mutation<Account>, LedgerError> {
    let amount = match request.amount {
        Some(amount) if !request.id.is_empty() && amount > 0 => amount,
        _ => {
            return Err(LedgerError::validation(
                "a valid account id and a positive deposit amount are required",
            ))
        }
    };

    let index = AccountDirectory::new(&accounts)
        .find_index_by_internal_id(&request.id)
        .ok_or_else(|| LedgerError::account_not_found(&request.id))?;

    let account = &mut accounts[index];
    account.cash = account
        .cash
        .checked_add(amount)
        .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", &request.id))?;
    let updated = account.clone();

    Ok(Mutation::new(accounts, updated))
}

/// Set an account's credit headroom
///
/// The value replaces the current credit; it is not added to it.
///
/// # Errors
///
/// - `Validation` if the id is empty or the credit is missing or not
///   strictly positive
/// - `AccountNotFound` if no account has the id
pub fn set_credit(
    mut accounts: Vec<Account>,
    request: SetCreditRequest,
) -> Result<Mutation<Account>, LedgerError> {
    let credit = match request.credit {
        Some(credit) if !request.id.is_empty() && credit > 0 => credit,
        _ => {
            return Err(LedgerError::validation(
                "a valid account id and a positive credit value are required",
            ))
        }
    };

    let index = AccountDirectory::new(&accounts)
        .find_index_by_internal_id(&request.id)
        .ok_or_else(|| LedgerError::account_not_found(&request.id))?;

    accounts[index].credit = credit;
    let updated = accounts[index].clone();

    Ok(Mutation::new(accounts, updated))
}

/// Move funds from one account to another
///
/// # Errors
///
/// Checked in this order:
///
/// - `AccountNotFound` if the sender or the recipient does not exist
/// - `InsufficientFunds` if the amount exceeds the sender's cash plus credit
/// - `SelfTransfer` if sender and recipient are the same account
/// - `AccountNotFound` if either resolved account has an empty id
/// - `Validation` if the amount is not strictly positive
/// - `TransferFailed` if neither settlement path applies
pub fn transfer(
    mut accounts: Vec<Account>,
    request: TransferRequest,
) -> Result<Mutation<TransferReceipt>, LedgerError> {
    let TransferRequest {
        sender_id,
        recipient_id,
        amount,
    } = request;

    let directory = AccountDirectory::new(&accounts);
    let sender_index = directory
        .find_index_by_internal_id(&sender_id)
        .ok_or_else(|| LedgerError::account_not_found(&sender_id))?;
    let recipient_index = directory
        .find_index_by_internal_id(&recipient_id)
        .ok_or_else(|| LedgerError::account_not_found(&recipient_id))?;

    let sender = &accounts[sender_index];
    let recipient = &accounts[recipient_index];

    let available = sender
        .available_funds()
        .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", &sender.id))?;
    if amount > available {
        return Err(LedgerError::insufficient_funds(&sender.id, available, amount));
    }

    if sender_id == recipient_id {
        return Err(LedgerError::self_transfer(&sender_id));
    }

    // Both accounts were resolved by id above; this only catches records
    // persisted with an empty id.
    if sender.id.is_empty() || recipient.id.is_empty() {
        return Err(LedgerError::account_not_found(if sender.id.is_empty() {
            &sender_id
        } else {
            &recipient_id
        }));
    }

    // A non-positive amount would run the settlement backwards and could
    // leave the recipient with negative cash.
    if amount <= 0 {
        return Err(LedgerError::validation("transfer amount must be positive"));
    }

    let (updated_sender, updated_recipient) = settle(sender, recipient, amount)?;

    accounts[sender_index] = updated_sender.clone();
    accounts[recipient_index] = updated_recipient.clone();

    Ok(Mutation::new(
        accounts,
        TransferReceipt {
            sender: updated_sender,
            recipient: updated_recipient,
        },
    ))
}

/// Compute both sides of a transfer from the pre-transfer snapshot
fn settle(
    sender: &Account,
    recipient: &Account,
    amount: Amount,
) -> Result<(Account, Account), LedgerError> {
    let recipient_cash = recipient
        .cash
        .checked_add(amount)
        .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", &recipient.id))?;
    let updated_recipient = Account {
        cash: recipient_cash,
        ..recipient.clone()
    };

    if sender.cash >= amount {
        let updated_sender = Account {
            cash: sender.cash - amount,
            ..sender.clone()
        };
        return Ok((updated_sender, updated_recipient));
    }

    match sender.available_funds() {
        Some(available) if amount <= available => {
            let shortfall = amount - sender.cash;
            let updated_sender = Account {
                cash: 0,
                credit: sender.credit - shortfall,
                ..sender.clone()
            };
            Ok((updated_sender, updated_recipient))
        }
        _ => Err(LedgerError::transfer_failed(
            &sender.id,
            &recipient.id,
            amount,
        )),
    }
}

/// Remove an account
///
/// Returns a confirmation message naming the removed id.
///
/// # Errors
///
/// - `AccountNotFound` if no account was removed
pub fn delete_account(
    accounts: Vec<Account>,
    id: &str,
) -> Result<Mutation<String>, LedgerError> {
    let before = accounts.len();
    let remaining: Vec<Account> = accounts
        .into_iter()
        .filter(|account| account.id != id)
        .collect();

    if remaining.len() == before {
        return Err(LedgerError::account_not_found(id));
    }

    Ok(Mutation::new(
        remaining,
        format!("Account with the id of {} was deleted", id),
    ))
}

/// Return every account holding strictly more cash than `threshold`
///
/// # Errors
///
/// - `NoAccountsAboveThreshold` if nothing matched
pub fn filter_by_cash(
    accounts: &[Account],
    threshold: Amount,
) -> Result<Vec<Account>, LedgerError> {
    let matching: Vec<Account> = accounts
        .iter()
        .filter(|account| account.cash > threshold)
        .cloned()
        .collect();

    if matching.is_empty() {
        return Err(LedgerError::NoAccountsAboveThreshold { threshold });
    }

    Ok(matching)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn fresh_id(directory: &AccountDirectory<'_>) -> AccountId {
    loop {
        let id = Uuid::new_v4().to_string();
        if !directory.exists_by_internal_id(&id) {
            return id;
        }
    }
}
