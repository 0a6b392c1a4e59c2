mod common;

use anyhow::Result;
use common::run_shell;
use fintrack::cli::{OutputFormat, ShellConfig};

const LOGIN: [&str; 2] = ["ana silva", "ANA@EX.COM"];

/// Login lines followed by the given menu steps.
fn session<'a>(steps: &[&'a str]) -> Vec<&'a str> {
    let mut lines: Vec<&'a str> = LOGIN.to_vec();
    lines.extend_from_slice(steps);
    lines
}

#[test]
fn test_full_session() -> Result<()> {
    let lines = session(&[
        "1", // balance
        "2", "300", "Loja", "", // transfer without description
        "3", "100,00", "Amigo", "birthday", // receive with description
        "4", // history
        "7", // exit
    ]);
    let (output, ledger) = run_shell(ShellConfig::default(), &lines)?;

    assert!(output.contains("Login successful!"));
    assert!(output.contains("User:             Ana Silva"));
    assert!(output.contains("Email:            ana@ex.com"));
    assert!(output.contains("Starting balance: 1250.00"));
    assert!(output.contains("Balance:     1250.00"));
    assert!(output.contains("Destination: Loja"));
    assert!(output.contains("New balance: 950.00"));
    assert!(output.contains("Origin:      Amigo - birthday"));
    assert!(output.contains("New balance: 1050.00"));
    assert!(output.contains("Login - starting balance 1250.00"));
    assert!(output.contains("Transfer: 300.00 to Loja"));
    assert!(output.contains("Receipt: 100.00 from Amigo - birthday"));
    assert!(output.contains("Session ended. Goodbye!"));

    // The session is discarded when the shell exits
    assert!(!ledger.is_logged_in());

    Ok(())
}

#[test]
fn test_login_gives_up_after_three_attempts() -> Result<()> {
    let lines = ["A1", "a@b.com", "Bob", "bad", "Ana", "x", "1"];
    let (output, ledger) = run_shell(ShellConfig::default(), &lines)?;

    assert!(output.contains("Error: Invalid name: only letters and spaces are allowed"));
    assert!(output.contains("Error: Invalid email: expected a format like name@example.com"));
    assert!(output.contains("Try again (2 attempts left)"));
    assert!(output.contains("Try again (1 attempt left)"));
    assert!(output.contains("Maximum number of login attempts reached."));
    assert!(output.contains("Login failed. Shutting down..."));
    assert!(!output.contains("MAIN MENU"));
    assert!(!ledger.is_logged_in());

    Ok(())
}

#[test]
fn test_login_attempts_are_configurable() -> Result<()> {
    let config = ShellConfig {
        max_login_attempts: 1,
        ..ShellConfig::default()
    };
    let (output, _) = run_shell(config, &["A1", "a@b.com", "Ana Silva", "ana@ex.com"])?;

    assert!(!output.contains("Try again"));
    assert!(output.contains("Maximum number of login attempts reached."));
    assert!(!output.contains("Login successful!"));

    Ok(())
}

#[test]
fn test_rejected_operations_are_reported() -> Result<()> {
    let lines = session(&[
        "2", "abc", // not a number
        "2", "0", // not positive
        "3", "1000000", // above limit
        "2", "5000", "Loja", "", // more than the balance
        "2", "100", "", "note", // blank destination
        "3", "100", "  ", "", // blank origin
        "9", // unknown option
    ]);
    let (output, _) = run_shell(ShellConfig::default(), &lines)?;

    assert!(output.contains("Error: Invalid amount: amount is not a number"));
    assert!(output.contains("Error: Invalid amount: amount must be greater than zero"));
    assert!(output.contains("Error: Invalid amount: amount must not exceed 999999.99"));
    assert!(output.contains("Available: 1250.00"));
    assert!(output.contains("Requested: 5000.00"));
    assert!(output.contains("Error: Transfer destination cannot be empty"));
    assert!(output.contains("Error: Origin of the money cannot be empty"));
    assert!(output.contains("Invalid option! Enter a number from 1 to 7."));
    assert!(!output.contains("Transfer completed!"));
    assert!(!output.contains("Money received!"));
    assert!(output.contains("Session ended. Goodbye!"));

    Ok(())
}

#[test]
fn test_logout_and_login_as_another_user() -> Result<()> {
    let lines = session(&["6", "s", "bruno costa", "bruno@ex.com", "5", "7"]);
    let (output, _) = run_shell(ShellConfig::default(), &lines)?;

    assert!(output.contains("Logged out. Session closed for Ana Silva."));
    assert!(output.contains("User:        Bruno Costa"));
    assert!(output.contains("Email:       bruno@ex.com"));

    Ok(())
}

#[test]
fn test_logout_and_leave() -> Result<()> {
    let lines = session(&["6", "n", "1"]);
    let (output, ledger) = run_shell(ShellConfig::default(), &lines)?;

    assert!(output.contains("Logged out. Session closed for Ana Silva."));
    assert_eq!(output.matches("MAIN MENU").count(), 1);
    assert!(!output.contains("BALANCE"));
    assert!(!ledger.is_logged_in());

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let config = ShellConfig {
        format: OutputFormat::Json,
        ..ShellConfig::default()
    };
    let lines = session(&["4", "5", "7"]);
    let (output, _) = run_shell(config, &lines)?;

    assert!(output.contains("\"kind\": \"login\""));
    assert!(output.contains("\"description\": \"Login - starting balance 1250.00\""));
    assert!(output.contains("\"email\": \"ana@ex.com\""));
    assert!(output.contains("\"balance\": 125000"));

    Ok(())
}

#[test]
fn test_end_of_input_mid_operation() -> Result<()> {
    let lines = session(&["2", "100"]);
    let (output, ledger) = run_shell(ShellConfig::default(), &lines)?;

    assert!(!output.contains("Transfer completed!"));
    assert!(output.contains("Session ended. Goodbye!"));
    assert!(!ledger.is_logged_in());

    Ok(())
}

#[test]
fn test_empty_input_ends_without_login() -> Result<()> {
    let (output, _) = run_shell(ShellConfig::default(), &[])?;

    assert!(output.contains("Login failed. Shutting down..."));
    assert!(output.contains("Session ended. Goodbye!"));

    Ok(())
}
