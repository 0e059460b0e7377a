//! Rust Ledger Service Library
//! # Overview
//!
//! This library provides a small account ledger persisted as a single CSV
//! file, served through either a synchronous or an asynchronous strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, request parameters, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Runtime configuration
//! - [`core`] - Business logic components:
//!   - [`core::operations`] - Pure ledger operations over an account collection
//!   - [`core::account_directory`] - Account lookup by internal and external id
//!   - [`core::engine`] - Load, mutate and replace cycles behind a writer gate
//! - [`io`] - Record stores (CSV file, async CSV file, in-memory)
//! - [`adapter`] - Request handlers mapping results to status codes
//!
//! # Operations
//!
//! - **Create**: open an account with zero cash and zero credit
//! - **Deposit**: add cash to an account
//! - **Set credit**: replace an account's credit headroom
//! - **Transfer**: move funds, drawing on the sender's credit once cash is
//!   exhausted
//! - **Delete**: remove an account
//! - **Filter**: list accounts holding more cash than a threshold
//! - **List / Get**: read the collection or a single account
//!
//! # Consistency
//!
//! Every mutating request loads the whole collection, applies one operation,
//! and replaces the whole collection. A rejected request persists nothing.

// Module declarations
pub mod adapter;
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod types;

pub use adapter::{create_handler, Request, RequestHandler, Response, ResponseBody, Status};
pub use config::LedgerConfig;
pub use core::{AsyncLedgerEngine, LedgerEngine, TransferReceipt};
pub use io::{write_accounts_csv, AsyncFileRecordStore, FileRecordStore, MemoryRecordStore};
pub use types::{Account, AccountId, Amount, ErrorKind, LedgerError};
