//! Runtime configuration
//!
//! `LedgerConfig` collects everything needed to build a request handler:
//! where the ledger lives, which strategy serves requests, and how many
//! worker threads the async strategy's runtime gets.

use crate::cli::StrategyType;
use std::path::PathBuf;
use tracing::warn;

/// Data file used when none is configured
pub const DEFAULT_DATA_FILE: &str = "ledger.csv";

/// Configuration for a ledger request handler
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// CSV file holding the account collection
    pub data_file: PathBuf,
    pub strategy: StrategyType,
    /// Worker threads for the async runtime (ignored by the sync strategy)
    pub worker_threads: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            strategy: StrategyType::Sync,
            worker_threads: num_cpus::get(),
        }
    }
}

impl LedgerConfig {
    /// Create a new LedgerConfig with custom values
    ///
    /// A zero worker thread count falls back to the default.
    pub fn new(data_file: impl Into<PathBuf>, strategy: StrategyType, worker_threads: usize) -> Self {
        let default = Self::default();

        let worker_threads = if worker_threads == 0 {
            warn!(
                requested = worker_threads,
                fallback = default.worker_threads,
                "invalid worker thread count, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            data_file: data_file.into(),
            strategy,
            worker_threads,
        }
    }
}
