//! Benchmark suite for ledger operations
//!
//! Compares the cost of one request under the synchronous and asynchronous
//! strategies, and the cost of the pure transfer operation on its own,
//! using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Datasets
//!
//! Each benchmark is run against ledgers of 100, 1,000 and 10,000 accounts.
//! Because every request rewrites the whole file, request cost grows with
//! the size of the ledger.

use divan::Bencher;
use rust_ledger_service::adapter::{create_handler, Request};
use rust_ledger_service::cli::StrategyType;
use rust_ledger_service::config::LedgerConfig;
use rust_ledger_service::core::operations;
use rust_ledger_service::core::RecordStore;
use rust_ledger_service::io::FileRecordStore;
use rust_ledger_service::types::{Account, DepositRequest, TransferRequest};
use tempfile::TempDir;

fn main() {
    divan::main();
}

fn seed_accounts(count: usize) -> Vec<Account> {
    (0..count)
        .map(|i| Account {
            cash: 1_000,
            credit: 500,
            ..Account::new(format!("acct-{}", i), format!("user-{}", i), "Bench", "User")
        })
        .collect()
}

/// Write a ledger of `count` accounts and return a config pointing at it
fn seeded_config(count: usize, strategy: StrategyType) -> (TempDir, LedgerConfig) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("ledger.csv");
    FileRecordStore::new(&path)
        .replace(&seed_accounts(count))
        .expect("Failed to seed ledger");

    (dir, LedgerConfig::new(path, strategy, 2))
}

fn deposit_request() -> Request {
    Request::Deposit(DepositRequest {
        id: "acct-0".to_string(),
        amount: Some(1),
    })
}

/// Benchmark a deposit served by the synchronous strategy
#[divan::bench(args = [100, 1_000, 10_000])]
fn sync_deposit(bencher: Bencher, accounts: usize) {
    let (_dir, config) = seeded_config(accounts, StrategyType::Sync);
    let handler = create_handler(&config).expect("Failed to create handler");

    bencher.bench_local(|| handler.handle(deposit_request()));
}

/// Benchmark a deposit served by the asynchronous strategy
#[divan::bench(args = [100, 1_000, 10_000])]
fn async_deposit(bencher: Bencher, accounts: usize) {
    let (_dir, config) = seeded_config(accounts, StrategyType::Async);
    let handler = create_handler(&config).expect("Failed to create handler");

    bencher.bench_local(|| handler.handle(deposit_request()));
}

/// Benchmark a full listing served by the synchronous strategy
#[divan::bench(args = [100, 1_000, 10_000])]
fn sync_list(bencher: Bencher, accounts: usize) {
    let (_dir, config) = seeded_config(accounts, StrategyType::Sync);
    let handler = create_handler(&config).expect("Failed to create handler");

    bencher.bench_local(|| handler.handle(Request::ListAccounts));
}

/// Benchmark a full listing served by the asynchronous strategy
#[divan::bench(args = [100, 1_000, 10_000])]
fn async_list(bencher: Bencher, accounts: usize) {
    let (_dir, config) = seeded_config(accounts, StrategyType::Async);
    let handler = create_handler(&config).expect("Failed to create handler");

    bencher.bench_local(|| handler.handle(Request::ListAccounts));
}

/// Benchmark the pure transfer operation on an in-memory collection
#[divan::bench(args = [100, 1_000, 10_000])]
fn transfer_in_memory(bencher: Bencher, accounts: usize) {
    let collection = seed_accounts(accounts);
    let last = format!("acct-{}", accounts - 1);

    bencher
        .with_inputs(|| collection.clone())
        .bench_values(|collection| {
            operations::transfer(
                collection,
                TransferRequest {
                    sender_id: "acct-0".to_string(),
                    recipient_id: last.clone(),
                    amount: 1_200,
                },
            )
            .expect("Transfer failed")
        });
}
