use crate::adapter::Request;
use crate::config::{LedgerConfig, DEFAULT_DATA_FILE};
use crate::types::{
    AccountId, Amount, CreateAccountRequest, DepositRequest, SetCreditRequest, TransferRequest,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Manage ledger accounts stored in a CSV file
#[derive(Parser, Debug)]
#[command(name = "ledger")]
#[command(about = "Manage ledger accounts stored in a CSV file", long_about = None)]
pub struct CliArgs {
    /// Ledger file holding every account
    #[arg(
        long = "data-file",
        value_name = "PATH",
        env = "LEDGER_DATA_FILE",
        default_value = DEFAULT_DATA_FILE,
        global = true,
        help = "Path to the ledger CSV file (created if missing)"
    )]
    pub data_file: PathBuf,

    /// Strategy used to serve the request
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        global = true,
        help = "Request strategy: 'sync' for blocking I/O or 'async' for tokio"
    )]
    pub strategy: StrategyType,

    /// Worker threads for the async runtime (async mode only)
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        global = true,
        help = "Number of async runtime worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available request strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Ledger requests
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every account
    List,

    /// Show a single account
    Get {
        /// Internal account id
        id: AccountId,
    },

    /// Open a new account with zero balances
    Create {
        /// External user id; must be unique
        #[arg(long = "user-id")]
        user_id: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Add cash to an account
    Deposit {
        id: AccountId,

        /// Amount to add (must be positive)
        #[arg(allow_negative_numbers = true)]
        amount: Option<Amount>,
    },

    /// Set an account's credit headroom
    SetCredit {
        id: AccountId,

        /// New credit value (must be positive)
        #[arg(allow_negative_numbers = true)]
        credit: Option<Amount>,
    },

    /// Move funds between two accounts
    Transfer {
        /// Sender account id
        #[arg(long)]
        from: AccountId,

        /// Recipient account id
        #[arg(long)]
        to: AccountId,

        #[arg(long, allow_negative_numbers = true)]
        amount: Amount,
    },

    /// Remove an account
    Delete { id: AccountId },

    /// List accounts holding more cash than a threshold
    Filter {
        #[arg(allow_negative_numbers = true)]
        threshold: Amount,
    },
}

impl Command {
    /// Convert the parsed subcommand into a ledger request
    pub fn into_request(self) -> Request {
        match self {
            Command::List => Request::ListAccounts,
            Command::Get { id } => Request::GetAccount { id },
            Command::Create {
                user_id,
                first_name,
                last_name,
            } => Request::CreateAccount(CreateAccountRequest {
                external_id: user_id,
                first_name,
                last_name,
            }),
            Command::Deposit { id, amount } => Request::Deposit(DepositRequest { id, amount }),
            Command::SetCredit { id, credit } => {
                Request::SetCredit(SetCreditRequest { id, credit })
            }
            Command::Transfer { from, to, amount } => Request::Transfer(TransferRequest {
                sender_id: from,
                recipient_id: to,
                amount,
            }),
            Command::Delete { id } => Request::DeleteAccount { id },
            Command::Filter { threshold } => Request::FilterByCash { threshold },
        }
    }
}

impl CliArgs {
    /// Create a LedgerConfig from CLI arguments
    ///
    /// Options that were not given fall back to the defaults of
    /// [`LedgerConfig`].
    pub fn to_config(&self) -> LedgerConfig {
        let default = LedgerConfig::default();
        LedgerConfig::new(
            self.data_file.clone(),
            self.strategy,
            self.worker_threads.unwrap_or(default.worker_threads),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["ledger", "list"], StrategyType::Sync)]
    #[case::explicit_sync(&["ledger", "--strategy", "sync", "list"], StrategyType::Sync)]
    #[case::explicit_async(&["ledger", "--strategy", "async", "list"], StrategyType::Async)]
    #[case::after_subcommand(&["ledger", "list", "--strategy", "async"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::list(&["ledger", "list"], Request::ListAccounts)]
    #[case::get(&["ledger", "get", "abc"], Request::GetAccount { id: "abc".to_string() })]
    #[case::create(
        &["ledger", "create", "--user-id", "u1", "--first-name", "Ada", "--last-name", "Lovelace"],
        Request::CreateAccount(CreateAccountRequest {
            external_id: Some("u1".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
        })
    )]
    #[case::create_partial(
        &["ledger", "create", "--first-name", "Ada"],
        Request::CreateAccount(CreateAccountRequest {
            external_id: None,
            first_name: Some("Ada".to_string()),
            last_name: None,
        })
    )]
    #[case::deposit(
        &["ledger", "deposit", "abc", "25"],
        Request::Deposit(DepositRequest { id: "abc".to_string(), amount: Some(25) })
    )]
    #[case::deposit_negative(
        &["ledger", "deposit", "abc", "-5"],
        Request::Deposit(DepositRequest { id: "abc".to_string(), amount: Some(-5) })
    )]
    #[case::deposit_without_amount(
        &["ledger", "deposit", "abc"],
        Request::Deposit(DepositRequest { id: "abc".to_string(), amount: None })
    )]
    #[case::set_credit(
        &["ledger", "set-credit", "abc", "40"],
        Request::SetCredit(SetCreditRequest { id: "abc".to_string(), credit: Some(40) })
    )]
    #[case::transfer(
        &["ledger", "transfer", "--from", "a", "--to", "b", "--amount", "60"],
        Request::Transfer(TransferRequest {
            sender_id: "a".to_string(),
            recipient_id: "b".to_string(),
            amount: 60,
        })
    )]
    #[case::delete(&["ledger", "delete", "abc"], Request::DeleteAccount { id: "abc".to_string() })]
    #[case::filter(&["ledger", "filter", "10"], Request::FilterByCash { threshold: 10 })]
    #[case::filter_negative(&["ledger", "filter", "-1"], Request::FilterByCash { threshold: -1 })]
    fn test_command_parsing(#[case] args: &[&str], #[case] expected: Request) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command.into_request(), expected);
    }

    // LedgerConfig conversion tests
    #[rstest]
    #[case::all_defaults(&["ledger", "list"], "ledger.csv", num_cpus::get())]
    #[case::custom_data_file(&["ledger", "--data-file", "/tmp/a.csv", "list"], "/tmp/a.csv", num_cpus::get())]
    #[case::custom_workers(&["ledger", "--worker-threads", "3", "list"], "ledger.csv", 3)]
    #[case::zero_workers(&["ledger", "--worker-threads", "0", "list"], "ledger.csv", num_cpus::get())]
    fn test_config_conversion(
        #[case] args: &[&str],
        #[case] expected_data_file: &str,
        #[case] expected_workers: usize,
    ) {
        // LEDGER_DATA_FILE is not set by the test harness
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_config();

        assert_eq!(config.data_file, PathBuf::from(expected_data_file));
        assert_eq!(config.worker_threads, expected_workers);
    }

    #[test]
    fn test_verbose_flag() {
        let parsed = CliArgs::try_parse_from(["ledger", "-v", "list"]).unwrap();
        assert!(parsed.verbose);
    }

    // Error handling tests
    #[rstest]
    #[case::missing_command(&["ledger"])]
    #[case::invalid_strategy(&["ledger", "--strategy", "invalid", "list"])]
    #[case::get_without_id(&["ledger", "get"])]
    #[case::transfer_without_amount(&["ledger", "transfer", "--from", "a", "--to", "b"])]
    #[case::non_numeric_amount(&["ledger", "deposit", "abc", "lots"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
