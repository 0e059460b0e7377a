//! Ledger CLI
//!
//! Command-line interface for managing accounts in a CSV-backed ledger.
//!
//! # Usage
//!
//! ```bash
//! ledger create --user-id u-1 --first-name Ada --last-name Lovelace
//! ledger deposit <ID> 50
//! ledger set-credit <ID> 20
//! ledger transfer --from <ID> --to <ID> --amount 60
//! ledger --strategy async --data-file /var/lib/ledger.csv list
//! ```
//!
//! Each invocation serves one request against the data file. Accounts are
//! printed to stdout as CSV; errors and logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: The request succeeded
//! - 1: The request was rejected or failed, or the handler could not start

use rust_ledger_service::adapter;
use rust_ledger_service::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    init_tracing(args.verbose);

    let config = args.to_config();
    let handler = match adapter::create_handler(&config) {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let response = handler.handle(args.command.into_request());

    // Successful bodies go to stdout, everything else to stderr
    let rendered = if response.status.is_success() {
        response.render(&mut std::io::stdout())
    } else {
        response.render(&mut std::io::stderr())
    };

    if let Err(e) = rendered {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    if !response.status.is_success() {
        process::exit(1);
    }
}

/// Install the stderr log subscriber; `RUST_LOG` takes precedence
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
