//! File-backed record store
//!
//! `FileRecordStore` keeps the whole account collection in a single CSV file
//! (see [`csv_format`](crate::io::csv_format) for the layout).
//!
//! # Design
//!
//! - A missing file is created holding an empty collection on first load.
//! - Every replace rewrites the entire collection. The new contents are
//!   written to a sibling `*.tmp` file, synced, and renamed over the target,
//!   so readers see either the old or the new collection, never a mix.
//! - I/O and decode failures are reported as `StorageRead` / `StorageWrite`
//!   with the file path attached.

use crate::core::traits::RecordStore;
use crate::io::csv_format::{read_accounts, write_accounts_csv};
use crate::types::{Account, LedgerError};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Blocking record store over a CSV file
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    /// Create a store backed by the file at `path`
    ///
    /// The file is not touched until the first load or replace.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, accounts: &[Account]) -> Result<(), String> {
        let temp = temp_path(&self.path);

        let result = (|| -> Result<(), String> {
            let file = File::create(&temp).map_err(|e| e.to_string())?;
            let mut writer = BufWriter::new(file);
            write_accounts_csv(accounts, &mut writer)?;
            let file = writer.into_inner().map_err(|e| e.to_string())?;
            file.sync_all().map_err(|e| e.to_string())?;
            fs::rename(&temp, &self.path).map_err(|e| e.to_string())
        })();

        if result.is_err() {
            // best effort: the target file is still intact
            let _ = fs::remove_file(&temp);
        }
        result
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self) -> Result<Vec<Account>, LedgerError> {
        let exists = self
            .path
            .try_exists()
            .map_err(|e| LedgerError::storage_read(&self.path, e.to_string()))?;
        if !exists {
            info!(path = %self.path.display(), "initializing empty ledger file");
            self.replace(&[])?;
        }

        let file = File::open(&self.path).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to open ledger file");
            LedgerError::storage_read(&self.path, e.to_string())
        })?;

        let accounts = read_accounts(file).map_err(|message| {
            error!(path = %self.path.display(), error = %message, "failed to decode ledger file");
            LedgerError::storage_read(&self.path, message)
        })?;

        debug!(path = %self.path.display(), accounts = accounts.len(), "accounts loaded");
        Ok(accounts)
    }

    fn replace(&self, accounts: &[Account]) -> Result<(), LedgerError> {
        self.write(accounts).map_err(|message| {
            error!(path = %self.path.display(), error = %message, "failed to write ledger file");
            LedgerError::storage_write(&self.path, message)
        })?;

        debug!(path = %self.path.display(), accounts = accounts.len(), "accounts written");
        Ok(())
    }
}

/// Sibling temporary file used while replacing `path`
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use tempfile::tempdir;

    fn account(id: &str, cash: i64) -> Account {
        Account {
            cash,
            ..Account::new(id.to_string(), format!("user-{}", id), "Ada", "Lovelace")
        }
    }

    #[test]
    fn test_load_initializes_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let store = FileRecordStore::new(&path);

        let accounts = store.load().unwrap();

        assert!(accounts.is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "id,external_id,first_name,last_name,cash,credit\n"
        );
    }

    #[test]
    fn test_replace_then_load() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path().join("ledger.csv"));
        let accounts = vec![account("a", 5), account("b", 7)];

        store.replace(&accounts).unwrap();

        assert_eq!(store.load().unwrap(), accounts);
        assert!(!temp_path(store.path()).exists());
    }

    #[test]
    fn test_replace_overwrites_whole_collection() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path().join("ledger.csv"));

        store.replace(&[account("a", 5), account("b", 7)]).unwrap();
        store.replace(&[account("c", 9)]).unwrap();

        assert_eq!(store.load().unwrap(), vec![account("c", 9)]);
    }

    #[test]
    fn test_load_accepts_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        fs::write(&path, "").unwrap();

        assert!(FileRecordStore::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        fs::write(&path, "id,cash\na,lots\n").unwrap();

        let err = FileRecordStore::new(&path).load().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StorageRead);
        // the malformed file is left as it was
        assert_eq!(fs::read_to_string(&path).unwrap(), "id,cash\na,lots\n");
    }

    #[test]
    fn test_load_from_directory_fails() {
        let dir = tempdir().unwrap();

        let err = FileRecordStore::new(dir.path()).load().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StorageRead);
    }

    #[test]
    fn test_replace_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path().join("missing").join("ledger.csv"));

        let err = store.replace(&[account("a", 1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageWrite);

        // initializing the missing file fails the same way
        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageWrite);
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/data/ledger.csv")),
            PathBuf::from("/data/ledger.csv.tmp")
        );
        assert_eq!(temp_path(Path::new("ledger.csv")), PathBuf::from("ledger.csv.tmp"));
    }
}
