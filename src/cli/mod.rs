mod shell;

pub use shell::{MenuChoice, Shell, ShellConfig};

use std::io;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::application::{LedgerConfig, LedgerService};
use crate::domain::{MAX_AMOUNT, format_amount, parse_amount};
use crate::logging;

/// FinTrack - Personal Finance Simulator
#[derive(Parser, Debug)]
#[command(name = "fintrack")]
#[command(about = "A single-session personal finance simulator: balance, transfers, receipts, history")]
#[command(version)]
pub struct Cli {
    /// Balance every new account starts with (e.g., "1250.00" or "1250,00")
    #[arg(long, default_value = "1250.00")]
    pub starting_balance: String,

    /// Number of history entries kept per session
    #[arg(long, default_value_t = 50)]
    pub history_capacity: usize,

    /// Failed login attempts allowed before the program exits
    #[arg(long, default_value_t = 3)]
    pub max_login_attempts: u32,

    /// Output format for history and profile: table, json
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Cli {
    pub fn ledger_config(&self) -> Result<LedgerConfig> {
        let starting_balance = parse_amount(&self.starting_balance)
            .with_context(|| format!("Invalid starting balance: {}", self.starting_balance))?;
        if starting_balance < 0 {
            bail!(
                "Starting balance cannot be negative: {}",
                format_amount(starting_balance)
            );
        }
        if starting_balance > MAX_AMOUNT {
            bail!(
                "Starting balance cannot exceed {}: {}",
                format_amount(MAX_AMOUNT),
                format_amount(starting_balance)
            );
        }
        if self.history_capacity == 0 {
            bail!("History capacity must be at least 1");
        }

        Ok(LedgerConfig {
            starting_balance,
            history_capacity: self.history_capacity,
        })
    }

    pub fn shell_config(&self) -> Result<ShellConfig> {
        let format = OutputFormat::from_str(&self.format).ok_or_else(|| {
            anyhow::anyhow!("Unknown format: {}. Use table or json.", self.format)
        })?;
        if self.max_login_attempts == 0 {
            bail!("At least one login attempt must be allowed");
        }

        Ok(ShellConfig {
            max_login_attempts: self.max_login_attempts,
            format,
        })
    }

    pub fn run(self) -> Result<()> {
        logging::init(self.verbose);

        let ledger_config = self.ledger_config()?;
        let shell_config = self.shell_config()?;
        tracing::debug!(?ledger_config, ?shell_config, "starting shell");

        let ledger = LedgerService::new(ledger_config);
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut shell = Shell::new(ledger, shell_config, stdin.lock(), stdout.lock());
        shell.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["fintrack"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.ledger_config().unwrap(), LedgerConfig::default());
        assert_eq!(cli.shell_config().unwrap(), ShellConfig::default());
    }

    #[test]
    fn test_custom_starting_balance_with_comma() {
        let cli = parse(&["--starting-balance", "500,25"]);
        assert_eq!(cli.ledger_config().unwrap().starting_balance, 50025);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse(&["--starting-balance", "lots"]).ledger_config().is_err());
        assert!(parse(&["--starting-balance=-5"]).ledger_config().is_err());
        assert!(parse(&["--starting-balance", "1000000"]).ledger_config().is_err());
        assert!(
            parse(&["--starting-balance", "92233720368547758.07"])
                .ledger_config()
                .is_err()
        );
        assert!(parse(&["--history-capacity", "0"]).ledger_config().is_err());
        assert!(parse(&["--max-login-attempts", "0"]).shell_config().is_err());
        assert!(parse(&["--format", "xml"]).shell_config().is_err());
    }

    #[test]
    fn test_starting_balance_upper_limit_is_inclusive() {
        let cli = parse(&["--starting-balance", "999999.99"]);
        assert_eq!(cli.ledger_config().unwrap().starting_balance, MAX_AMOUNT);
    }

    #[test]
    fn test_json_format() {
        let cli = parse(&["-f", "JSON"]);
        assert_eq!(cli.shell_config().unwrap().format, OutputFormat::Json);
    }
}
