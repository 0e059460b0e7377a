//! Asynchronous file-backed record store
//!
//! `AsyncFileRecordStore` has the same on-disk behaviour as
//! [`FileRecordStore`](crate::io::FileRecordStore) but performs its I/O on
//! tokio.
//!
//! # Design
//!
//! The store uses:
//! - tokio::fs for file access
//! - tokio-util compat wrappers to hand tokio files to csv-async
//! - the shared csv_format module for encoding and decoding
//!
//! ```text
//! tokio::fs::File → Compat → csv-async → Vec<Account>
//! ```

use crate::core::traits::AsyncRecordStore;
use crate::io::csv_format::{read_accounts_async, write_accounts_async};
use crate::io::file_store::temp_path;
use crate::types::{Account, LedgerError};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};
use tracing::{debug, error, info};

/// Asynchronous record store over a CSV file
#[derive(Debug, Clone)]
pub struct AsyncFileRecordStore {
    path: PathBuf,
}

impl AsyncFileRecordStore {
    /// Create a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<Account>, LedgerError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| LedgerError::storage_read(&self.path, e.to_string()))?;
        if !exists {
            info!(path = %self.path.display(), "initializing empty ledger file");
            self.write(&[]).await?;
        }

        let file = tokio::fs::File::open(&self.path).await.map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to open ledger file");
            LedgerError::storage_read(&self.path, e.to_string())
        })?;

        let accounts = read_accounts_async(file.compat()).await.map_err(|message| {
            error!(path = %self.path.display(), error = %message, "failed to decode ledger file");
            LedgerError::storage_read(&self.path, message)
        })?;

        debug!(path = %self.path.display(), accounts = accounts.len(), "accounts loaded");
        Ok(accounts)
    }

    async fn write(&self, accounts: &[Account]) -> Result<(), LedgerError> {
        let temp = temp_path(&self.path);

        if let Err(message) = self.write_to(&temp, accounts).await {
            // best effort: the target file is still intact
            let _ = tokio::fs::remove_file(&temp).await;
            error!(path = %self.path.display(), error = %message, "failed to write ledger file");
            return Err(LedgerError::storage_write(&self.path, message));
        }

        debug!(path = %self.path.display(), accounts = accounts.len(), "accounts written");
        Ok(())
    }

    async fn write_to(&self, temp: &Path, accounts: &[Account]) -> Result<(), String> {
        let file = tokio::fs::File::create(temp)
            .await
            .map_err(|e| e.to_string())?;

        let mut compat_file = file.compat_write();
        write_accounts_async(accounts, &mut compat_file).await?;

        let mut file = compat_file.into_inner();
        file.flush().await.map_err(|e| e.to_string())?;
        file.sync_all().await.map_err(|e| e.to_string())?;

        tokio::fs::rename(temp, &self.path)
            .await
            .map_err(|e| e.to_string())
    }
}

impl AsyncRecordStore for AsyncFileRecordStore {
    async fn load(&self) -> Result<Vec<Account>, LedgerError> {
        self.read().await
    }

    async fn replace(&self, accounts: &[Account]) -> Result<(), LedgerError> {
        self.write(accounts).await
    }
}
