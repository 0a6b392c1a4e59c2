use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};

use crate::application::{AppError, LedgerService};
use crate::domain::{
    Cents, format_amount, parse_amount,
    validation::{check_amount, is_non_empty},
};

use super::OutputFormat;

const DIVIDER: &str = "===================================";
const LINE: &str = "-----------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellConfig {
    /// Failed logins allowed before the shell gives up
    pub max_login_attempts: u32,
    pub format: OutputFormat,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 3,
            format: OutputFormat::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Balance,
    Transfer,
    Receive,
    History,
    Profile,
    Logout,
    Exit,
}

impl MenuChoice {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(MenuChoice::Balance),
            "2" => Some(MenuChoice::Transfer),
            "3" => Some(MenuChoice::Receive),
            "4" => Some(MenuChoice::History),
            "5" => Some(MenuChoice::Profile),
            "6" => Some(MenuChoice::Logout),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

/// Interactive menu over a ledger session.
///
/// Generic over its input and output so it can run on stdin/stdout or on
/// in-memory buffers. End of input at any prompt ends the session.
pub struct Shell<R, W> {
    ledger: LedgerService,
    config: ShellConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(ledger: LedgerService, config: ShellConfig, input: R, output: W) -> Self {
        Self {
            ledger,
            config,
            input,
            output,
        }
    }

    pub fn into_parts(self) -> (LedgerService, W) {
        (self.ledger, self.output)
    }

    /// Run the whole session: login, menu loop, goodbye.
    pub fn run(&mut self) -> Result<()> {
        self.welcome()?;

        if self.login()? {
            self.menu_loop()?;
        } else {
            writeln!(self.output, "Login failed. Shutting down...")?;
        }

        if let Some(closed) = self.ledger.logout() {
            tracing::debug!(
                entries = closed.history.len(),
                "session discarded at exit"
            );
        }

        self.goodbye()?;
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    fn welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", DIVIDER)?;
        writeln!(self.output, "FINTRACK")?;
        writeln!(self.output, "Personal finance simulator")?;
        writeln!(self.output, "{}", DIVIDER)?;
        Ok(())
    }

    fn goodbye(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", DIVIDER)?;
        writeln!(self.output, "Session ended. Goodbye!")?;
        writeln!(self.output, "{}", DIVIDER)?;
        Ok(())
    }

    /// Ask for name and email until a login succeeds or attempts run out.
    /// Returns false on exhaustion or end of input.
    fn login(&mut self) -> Result<bool> {
        writeln!(self.output)?;
        writeln!(self.output, "LOGIN")?;
        writeln!(self.output, "{}", LINE)?;

        let max_attempts = self.config.max_login_attempts;
        for attempt in 1..=max_attempts {
            let Some(name) = self.prompt("Full name: ")? else {
                return Ok(false);
            };
            let Some(email) = self.prompt("Email: ")? else {
                return Ok(false);
            };

            let result = self
                .ledger
                .login_or_create(&name, &email)
                .map(|account| (account.name.clone(), account.email.clone(), account.balance()));

            match result {
                Ok((name, email, balance)) => {
                    writeln!(self.output, "Login successful!")?;
                    writeln!(self.output, "User:             {}", name)?;
                    writeln!(self.output, "Email:            {}", email)?;
                    writeln!(self.output, "Starting balance: {}", format_amount(balance))?;
                    return Ok(true);
                }
                Err(err) => {
                    self.render_error(&err)?;
                    let remaining = max_attempts - attempt;
                    if remaining > 0 {
                        writeln!(
                            self.output,
                            "Try again ({} attempt{} left)",
                            remaining,
                            if remaining == 1 { "" } else { "s" }
                        )?;
                    }
                }
            }
        }

        writeln!(self.output, "Maximum number of login attempts reached.")?;
        Ok(false)
    }

    fn menu_loop(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(raw) = self.read_line()? else {
                return Ok(());
            };

            let step = match MenuChoice::from_str(&raw) {
                Some(MenuChoice::Balance) => self.show_balance()?,
                Some(MenuChoice::Transfer) => self.transfer()?,
                Some(MenuChoice::Receive) => self.receive()?,
                Some(MenuChoice::History) => self.show_history()?,
                Some(MenuChoice::Profile) => self.show_profile()?,
                Some(MenuChoice::Logout) => self.logout()?,
                Some(MenuChoice::Exit) => Step::Quit,
                None => {
                    writeln!(self.output, "Invalid option! Enter a number from 1 to 7.")?;
                    Step::Continue
                }
            };

            if step == Step::Quit {
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", DIVIDER)?;
        writeln!(self.output, "MAIN MENU")?;
        writeln!(self.output, "{}", DIVIDER)?;
        writeln!(self.output, "1. Check balance")?;
        writeln!(self.output, "2. Transfer money")?;
        writeln!(self.output, "3. Receive money")?;
        writeln!(self.output, "4. Transaction history")?;
        writeln!(self.output, "5. My profile")?;
        writeln!(self.output, "6. Log out")?;
        writeln!(self.output, "7. Exit")?;
        writeln!(self.output, "{}", LINE)?;
        write!(self.output, "Choose an option (1-7): ")?;
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    // ========================
    // Actions
    // ========================

    fn show_balance(&mut self) -> Result<Step> {
        match self.ledger.balance() {
            Ok(view) => {
                writeln!(self.output)?;
                writeln!(self.output, "BALANCE")?;
                writeln!(self.output, "{}", LINE)?;
                writeln!(self.output, "Account:     {}", view.account_name)?;
                writeln!(self.output, "Balance:     {}", format_amount(view.balance))?;
                writeln!(
                    self.output,
                    "Last update: {}",
                    format_timestamp(&view.last_access_at)
                )?;
            }
            Err(err) => self.render_error(&err)?,
        }
        Ok(Step::Continue)
    }

    fn transfer(&mut self) -> Result<Step> {
        writeln!(self.output)?;
        writeln!(self.output, "TRANSFER")?;
        writeln!(self.output, "{}", LINE)?;

        let Some(amount) = self.prompt_amount()? else {
            return Ok(Step::Quit);
        };
        let Some(amount) = amount else {
            return Ok(Step::Continue);
        };
        let Some(label) = self.prompt_counterparty("Send to: ")? else {
            return Ok(Step::Quit);
        };

        match self.ledger.transfer(amount, &label) {
            Ok(receipt) => {
                writeln!(self.output, "Transfer completed!")?;
                writeln!(self.output, "Amount:      {}", format_amount(receipt.amount))?;
                writeln!(self.output, "Destination: {}", receipt.counterparty)?;
                writeln!(self.output, "New balance: {}", format_amount(receipt.new_balance))?;
            }
            Err(err) => self.render_error(&err)?,
        }
        Ok(Step::Continue)
    }

    fn receive(&mut self) -> Result<Step> {
        writeln!(self.output)?;
        writeln!(self.output, "RECEIVE")?;
        writeln!(self.output, "{}", LINE)?;

        let Some(amount) = self.prompt_amount()? else {
            return Ok(Step::Quit);
        };
        let Some(amount) = amount else {
            return Ok(Step::Continue);
        };
        let Some(label) = self.prompt_counterparty("Received from: ")? else {
            return Ok(Step::Quit);
        };

        match self.ledger.receive(amount, &label) {
            Ok(receipt) => {
                writeln!(self.output, "Money received!")?;
                writeln!(self.output, "Amount:      {}", format_amount(receipt.amount))?;
                writeln!(self.output, "Origin:      {}", receipt.counterparty)?;
                writeln!(self.output, "New balance: {}", format_amount(receipt.new_balance))?;
            }
            Err(err) => self.render_error(&err)?,
        }
        Ok(Step::Continue)
    }

    fn show_history(&mut self) -> Result<Step> {
        let history = match self.ledger.history() {
            Ok(history) => history,
            Err(err) => {
                self.render_error(&err)?;
                return Ok(Step::Continue);
            }
        };

        match self.config.format {
            OutputFormat::Json => {
                writeln!(self.output, "{}", serde_json::to_string_pretty(&history)?)?;
            }
            OutputFormat::Table => {
                writeln!(self.output)?;
                writeln!(self.output, "TRANSACTION HISTORY")?;
                writeln!(self.output, "{}", LINE)?;
                if history.is_empty() {
                    writeln!(self.output, "No transactions yet.")?;
                }
                for (i, entry) in history.iter().enumerate() {
                    writeln!(
                        self.output,
                        "{}. {} - {}",
                        i + 1,
                        format_timestamp(&entry.timestamp),
                        entry.description
                    )?;
                }
            }
        }
        Ok(Step::Continue)
    }

    fn show_profile(&mut self) -> Result<Step> {
        let profile = match self.ledger.profile() {
            Ok(profile) => profile,
            Err(err) => {
                self.render_error(&err)?;
                return Ok(Step::Continue);
            }
        };

        match self.config.format {
            OutputFormat::Json => {
                writeln!(self.output, "{}", serde_json::to_string_pretty(&profile)?)?;
            }
            OutputFormat::Table => {
                writeln!(self.output)?;
                writeln!(self.output, "MY PROFILE")?;
                writeln!(self.output, "{}", LINE)?;
                writeln!(self.output, "User:        {}", profile.name)?;
                writeln!(self.output, "Email:       {}", profile.email)?;
                writeln!(self.output, "Balance:     {}", format_amount(profile.balance))?;
                writeln!(
                    self.output,
                    "Created:     {}",
                    format_timestamp(&profile.created_at)
                )?;
                writeln!(
                    self.output,
                    "Last access: {}",
                    format_timestamp(&profile.last_access_at)
                )?;
            }
        }
        Ok(Step::Continue)
    }

    fn logout(&mut self) -> Result<Step> {
        if let Some(closed) = self.ledger.logout() {
            writeln!(self.output, "Logged out. Session closed for {}.", closed.account.name)?;
        }

        let Some(answer) = self.prompt("Log in with another user? (y/N): ")? else {
            return Ok(Step::Quit);
        };
        if !matches!(answer.to_lowercase().as_str(), "y" | "yes" | "s" | "sim") {
            return Ok(Step::Quit);
        }

        if self.login()? {
            Ok(Step::Continue)
        } else {
            writeln!(self.output, "Login failed. Shutting down...")?;
            Ok(Step::Quit)
        }
    }

    // ========================
    // Input helpers
    // ========================

    /// Read one trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush().context("Failed to flush output")?;
        self.read_line()
    }

    /// Outer `None` means end of input; inner `None` means the amount was
    /// rejected and already reported.
    fn prompt_amount(&mut self) -> Result<Option<Option<Cents>>> {
        let Some(raw) = self.prompt("Amount: ")? else {
            return Ok(None);
        };

        let checked = parse_amount(&raw)
            .map_err(AppError::from)
            .and_then(|amount| {
                check_amount(amount)
                    .map(|_| amount)
                    .map_err(AppError::InvalidAmount)
            });

        match checked {
            Ok(amount) => Ok(Some(Some(amount))),
            Err(err) => {
                self.render_error(&err)?;
                Ok(Some(None))
            }
        }
    }

    /// Ask for the counterparty and an optional description, joined as
    /// "label - description".
    fn prompt_counterparty(&mut self, label: &str) -> Result<Option<String>> {
        let Some(counterparty) = self.prompt(label)? else {
            return Ok(None);
        };
        let Some(description) = self.prompt("Description (optional): ")? else {
            return Ok(None);
        };
        Ok(Some(with_description(&counterparty, &description)))
    }

    fn render_error(&mut self, err: &AppError) -> Result<()> {
        writeln!(self.output, "Error: {}", err)?;
        match err {
            AppError::InsufficientFunds { balance, required } => {
                writeln!(self.output, "Available: {}", format_amount(*balance))?;
                writeln!(self.output, "Requested: {}", format_amount(*required))?;
            }
            AppError::BalanceLimit { balance, .. } => {
                writeln!(self.output, "Current balance: {}", format_amount(*balance))?;
            }
            AppError::InvalidName(_) => {
                writeln!(
                    self.output,
                    "Names must have 2 to 50 characters, letters and spaces only."
                )?;
            }
            AppError::InvalidEmail(_) => {
                writeln!(self.output, "Expected format: name@example.com")?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Blank counterparties are passed through untouched so the ledger rejects them.
fn with_description(counterparty: &str, description: &str) -> String {
    if !is_non_empty(counterparty) || !is_non_empty(description) {
        return counterparty.to_string();
    }
    format!("{} - {}", counterparty.trim(), description.trim())
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!(MenuChoice::from_str("1"), Some(MenuChoice::Balance));
        assert_eq!(MenuChoice::from_str(" 7 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_str("8"), None);
        assert_eq!(MenuChoice::from_str("balance"), None);
    }

    #[test]
    fn test_with_description() {
        assert_eq!(with_description("Loja", ""), "Loja");
        assert_eq!(with_description("Loja", "  "), "Loja");
        assert_eq!(with_description(" Loja ", " shoes "), "Loja - shoes");
        assert_eq!(with_description("", "shoes"), "");
    }
}
