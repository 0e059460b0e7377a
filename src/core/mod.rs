//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Record store abstractions (blocking and async)
//! - `account_directory` - Lookups over a loaded account collection
//! - `operations` - Pure ledger operations (create, deposit, transfer, ...)
//! - `engine` - Load-mutate-replace orchestration behind a writer gate
//! - `async` - Asynchronous engine

pub mod account_directory;
pub mod r#async;
pub mod engine;
pub mod operations;
pub mod traits;

pub use account_directory::AccountDirectory;
pub use engine::LedgerEngine;
pub use operations::{Mutation, TransferReceipt};
pub use r#async::AsyncLedgerEngine;
pub use traits::{AsyncRecordStore, RecordStore};
