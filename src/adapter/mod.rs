//! Request adapter
//!
//! Translates caller requests into ledger engine calls and engine results
//! into status-coded responses. Two handlers implement the same interface:
//!
//! - [`SyncRequestHandler`] drives a [`LedgerEngine`](crate::core::LedgerEngine)
//!   over a blocking file store.
//! - [`AsyncRequestHandler`] owns a tokio runtime and drives an
//!   [`AsyncLedgerEngine`](crate::core::AsyncLedgerEngine) over the async
//!   file store.
//!
//! The handler is selected at runtime from [`LedgerConfig::strategy`].
//!
//! # Status codes
//!
//! | Error kind                                   | Status |
//! |----------------------------------------------|--------|
//! | Validation, InsufficientFunds, Transfer      | 400    |
//! | NotFound                                     | 404    |
//! | Conflict                                     | 409    |
//! | StorageRead, StorageWrite                    | 500    |

use crate::cli::StrategyType;
use crate::config::LedgerConfig;
use crate::io::csv_format::write_accounts_csv;
use crate::io::{AsyncFileRecordStore, FileRecordStore};
use crate::types::{
    Account, AccountId, Amount, CreateAccountRequest, DepositRequest, ErrorKind, LedgerError,
    SetCreditRequest, TransferRequest,
};
use std::io::Write;

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncRequestHandler;
pub use sync::SyncRequestHandler;

/// Body returned for storage failures; the detail only goes to the log
pub const STORAGE_FAILURE_MESSAGE: &str = "Internal error: the ledger could not be accessed";

/// A single call into the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListAccounts,
    GetAccount { id: AccountId },
    CreateAccount(CreateAccountRequest),
    Deposit(DepositRequest),
    SetCredit(SetCreditRequest),
    Transfer(TransferRequest),
    DeleteAccount { id: AccountId },
    FilterByCash { threshold: Amount },
}

/// Response status, numbered like the equivalent HTTP codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    BadRequest,
    NotFound,
    Conflict,
    InternalError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::Conflict => 409,
            Status::InternalError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Status::Ok | Status::Created)
    }
}

impl From<ErrorKind> for Status {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation | ErrorKind::InsufficientFunds | ErrorKind::Transfer => {
                Status::BadRequest
            }
            ErrorKind::NotFound => Status::NotFound,
            ErrorKind::Conflict => Status::Conflict,
            ErrorKind::StorageRead | ErrorKind::StorageWrite => Status::InternalError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Account(Account),
    Accounts(Vec<Account>),
    Message(String),
    Error(String),
}

/// Outcome of a handled request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub body: ResponseBody,
}

impl Response {
    /// Build the response for an engine result
    ///
    /// Success uses `status` and wraps the value with `body`; failure takes
    /// its status from the error kind.
    pub fn from_result<T>(
        result: Result<T, LedgerError>,
        status: Status,
        body: impl FnOnce(T) -> ResponseBody,
    ) -> Self {
        match result {
            Ok(value) => Response {
                status,
                body: body(value),
            },
            Err(error) => Response::from_error(&error),
        }
    }

    pub fn from_error(error: &LedgerError) -> Self {
        let status = Status::from(error.kind());
        let message = match status {
            Status::InternalError => STORAGE_FAILURE_MESSAGE.to_string(),
            _ => error.to_string(),
        };

        Response {
            status,
            body: ResponseBody::Error(message),
        }
    }

    /// Write the body to `output`
    ///
    /// Accounts are written as CSV with a header row; messages and errors as
    /// a single line.
    pub fn render(&self, output: &mut dyn Write) -> Result<(), String> {
        match &self.body {
            ResponseBody::Account(account) => {
                write_accounts_csv(std::slice::from_ref(account), output)
            }
            ResponseBody::Accounts(accounts) => write_accounts_csv(accounts, output),
            ResponseBody::Message(message) => {
                writeln!(output, "{}", message).map_err(|e| e.to_string())
            }
            ResponseBody::Error(message) => {
                writeln!(output, "Error: {}", message).map_err(|e| e.to_string())
            }
        }
    }
}

/// Request handler trait shared by the sync and async strategies
pub trait RequestHandler: Send + Sync {
    /// Serve one request
    ///
    /// Every failure, including storage failures, is reported through the
    /// response status; this never panics on bad input.
    fn handle(&self, request: Request) -> Response;
}

/// Create the request handler selected by `config`
///
/// # Errors
///
/// Returns an error if the async strategy's runtime cannot be built.
pub fn create_handler(config: &LedgerConfig) -> Result<Box<dyn RequestHandler>, String> {
    match config.strategy {
        StrategyType::Sync => Ok(Box::new(SyncRequestHandler::new(FileRecordStore::new(
            &config.data_file,
        )))),
        StrategyType::Async => Ok(Box::new(AsyncRequestHandler::new(
            AsyncFileRecordStore::new(&config.data_file),
            config.worker_threads,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::validation(ErrorKind::Validation, 400)]
    #[case::insufficient_funds(ErrorKind::InsufficientFunds, 400)]
    #[case::transfer(ErrorKind::Transfer, 400)]
    #[case::not_found(ErrorKind::NotFound, 404)]
    #[case::conflict(ErrorKind::Conflict, 409)]
    #[case::storage_read(ErrorKind::StorageRead, 500)]
    #[case::storage_write(ErrorKind::StorageWrite, 500)]
    fn test_status_from_kind(#[case] kind: ErrorKind, #[case] code: u16) {
        let status = Status::from(kind);

        assert_eq!(status.code(), code);
        assert!(!status.is_success());
    }

    #[test]
    fn test_storage_errors_hide_details() {
        let error = LedgerError::storage_read(Path::new("/secret/ledger.csv"), "permission denied");

        let response = Response::from_error(&error);

        assert_eq!(response.status, Status::InternalError);
        assert_eq!(
            response.body,
            ResponseBody::Error(STORAGE_FAILURE_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_domain_errors_keep_message() {
        let error = LedgerError::account_not_found("abc");

        let response = Response::from_error(&error);

        assert_eq!(response.status, Status::NotFound);
        assert_eq!(response.body, ResponseBody::Error(error.to_string()));
    }

    #[test]
    fn test_render_account() {
        let response = Response {
            status: Status::Created,
            body: ResponseBody::Account(Account {
                cash: 5,
                ..Account::new("a".to_string(), "user-a", "Ada", "Lovelace")
            }),
        };
        let mut output = Vec::new();

        response.render(&mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,external_id,first_name,last_name,cash,credit\na,user-a,Ada,Lovelace,5,0\n"
        );
    }

    #[rstest]
    #[case::message(ResponseBody::Message("done".to_string()), "done\n")]
    #[case::error(ResponseBody::Error("nope".to_string()), "Error: nope\n")]
    #[case::no_accounts(ResponseBody::Accounts(Vec::new()), "id,external_id,first_name,last_name,cash,credit\n")]
    fn test_render_text(#[case] body: ResponseBody, #[case] expected: &str) {
        let response = Response {
            status: Status::Ok,
            body,
        };
        let mut output = Vec::new();

        response.render(&mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }
}
