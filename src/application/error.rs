use thiserror::Error;

use crate::domain::{AmountIssue, Cents, EmailIssue, NameIssue, ParseAmountError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Invalid name: {0}")]
    InvalidName(NameIssue),

    #[error("Invalid email: {0}")]
    InvalidEmail(EmailIssue),

    #[error("Invalid amount: {0}")]
    InvalidAmount(AmountIssue),

    #[error("Transfer destination cannot be empty")]
    EmptyDestination,

    #[error("Origin of the money cannot be empty")]
    EmptyOrigin,

    #[error("Insufficient funds: balance {balance} cents, required {required} cents")]
    InsufficientFunds { balance: Cents, required: Cents },

    #[error("Balance limit exceeded: balance {balance} cents, receiving {amount} cents")]
    BalanceLimit { balance: Cents, amount: Cents },

    #[error("No user is logged in")]
    NotLoggedIn,
}

impl From<ParseAmountError> for AppError {
    fn from(_: ParseAmountError) -> Self {
        AppError::InvalidAmount(AmountIssue::Unparseable)
    }
}
