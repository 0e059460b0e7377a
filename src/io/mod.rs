//! I/O module
//!
//! Handles persistence of the account collection.
//!
//! # Components
//!
//! - `csv_format` - CSV layout, encoding and decoding (blocking and async)
//! - `file_store` - Blocking record store over a CSV file
//! - `async_file_store` - tokio record store over a CSV file
//! - `memory_store` - In-memory record store

pub mod async_file_store;
pub mod csv_format;
pub mod file_store;
pub mod memory_store;

pub use async_file_store::AsyncFileRecordStore;
pub use csv_format::{read_accounts, write_accounts_csv, ACCOUNT_HEADERS};
pub use file_store::FileRecordStore;
pub use memory_store::MemoryRecordStore;
