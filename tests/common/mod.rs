// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Cursor;

use anyhow::Result;
use fintrack::LedgerService;
use fintrack::cli::{Shell, ShellConfig};

pub const ANA_NAME: &str = "Ana Silva";
pub const ANA_EMAIL: &str = "ana@ex.com";

/// Helper to create a service already logged in as Ana
pub fn logged_in_service() -> Result<LedgerService> {
    let mut service = LedgerService::default();
    service.login_or_create(ANA_NAME, ANA_EMAIL)?;
    Ok(service)
}

/// Run the shell over the given lines of input and return everything it printed
/// together with the ledger it left behind.
pub fn run_shell(config: ShellConfig, lines: &[&str]) -> Result<(String, LedgerService)> {
    let mut input = lines.join("\n");
    input.push('\n');

    let mut shell = Shell::new(
        LedgerService::default(),
        config,
        Cursor::new(input.into_bytes()),
        Vec::new(),
    );
    shell.run()?;

    let (ledger, output) = shell.into_parts();
    Ok((String::from_utf8(output)?, ledger))
}
