//! CSV format handling for persisted and printed accounts
//!
//! This module centralizes all CSV format concerns, providing:
//! - The column layout of the ledger file
//! - Blocking and async decoding of an account collection
//! - Blocking and async encoding of an account collection
//!
//! The same layout is used for the backing file and for account listings
//! printed by the CLI, so anything the CLI prints can be read back as a
//! ledger file.

use crate::types::Account;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use csv_async::{AsyncReaderBuilder, AsyncWriterBuilder};
use futures::io::{AsyncRead, AsyncWrite};
use futures::stream::StreamExt;
use std::io::{Read, Write};

/// Header row of the ledger file, in column order
pub const ACCOUNT_HEADERS: [&str; 6] = [
    "id",
    "external_id",
    "first_name",
    "last_name",
    "cash",
    "credit",
];

/// Decode an account collection
///
/// Input order is preserved. Whitespace around fields is trimmed, and an
/// empty input decodes as an empty collection.
///
/// # Returns
///
/// * `Ok(Vec<Account>)` if every row decoded
/// * `Err(String)` describing the first row that did not
pub fn read_accounts<R: Read>(input: R) -> Result<Vec<Account>, String> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    // deserialize() swallows a failed header read, so surface it here
    reader
        .headers()
        .map_err(|e| format!("invalid ledger header: {}", e))?;

    reader
        .deserialize::<Account>()
        .map(|record| {
            record.map_err(|e| match e.position() {
                Some(pos) => format!("invalid account record at line {}: {}", pos.line(), e),
                None => format!("invalid account record: {}", e),
            })
        })
        .collect()
}

/// Write accounts in CSV format
///
/// Writes the header row followed by one row per account, in the given
/// order. The header is written even when there are no accounts.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer
        .write_record(ACCOUNT_HEADERS)
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for account in accounts {
        writer
            .serialize(account)
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Async counterpart of [`read_accounts`]
pub async fn read_accounts_async<R>(input: R) -> Result<Vec<Account>, String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut reader = AsyncReaderBuilder::new()
        .trim(csv_async::Trim::All)
        .create_deserializer(input);
    let mut records = reader.deserialize::<Account>();

    let mut accounts = Vec::new();
    while let Some(record) = records.next().await {
        let account = record.map_err(|e| match e.position() {
            Some(pos) => format!("invalid account record at line {}: {}", pos.line(), e),
            None => format!("invalid account record: {}", e),
        })?;
        accounts.push(account);
    }

    Ok(accounts)
}

/// Async counterpart of [`write_accounts_csv`]
pub async fn write_accounts_async<W>(accounts: &[Account], output: W) -> Result<(), String>
where
    W: AsyncWrite + Unpin,
{
    let mut writer = AsyncWriterBuilder::new()
        .has_headers(false)
        .create_serializer(output);

    writer
        .serialize(ACCOUNT_HEADERS)
        .await
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for account in accounts {
        writer
            .serialize(account)
            .await
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .await
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
