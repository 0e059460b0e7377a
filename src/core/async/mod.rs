//! Asynchronous implementations of core components
//!
//! The async engine uses the same pure ledger operations as the blocking
//! engine; only persistence and the writer gate differ:
//!
//! - **AsyncLedgerEngine**: drives operations against an `AsyncRecordStore`,
//!   holding a `tokio::sync::Mutex` for each load-mutate-replace cycle

pub mod engine;

pub use engine::AsyncLedgerEngine;
