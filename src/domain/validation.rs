//! Input checks and normalization for names, emails and amounts.
//!
//! Every check comes in two flavours: a `validate_*` predicate and a
//! `check_*` function returning the reason an input was rejected, so callers
//! can decide how to present it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::{Cents, MAX_AMOUNT};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("Invalid regex pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameIssue {
    Empty,
    TooShort,
    TooLong,
    InvalidCharacters,
}

impl fmt::Display for NameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameIssue::Empty => write!(f, "name is empty"),
            NameIssue::TooShort => {
                write!(f, "name must have at least {} characters", NAME_MIN_CHARS)
            }
            NameIssue::TooLong => {
                write!(f, "name must have at most {} characters", NAME_MAX_CHARS)
            }
            NameIssue::InvalidCharacters => write!(f, "only letters and spaces are allowed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailIssue {
    Empty,
    Malformed,
}

impl fmt::Display for EmailIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailIssue::Empty => write!(f, "email is empty"),
            EmailIssue::Malformed => write!(f, "expected a format like name@example.com"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountIssue {
    Unparseable,
    NotPositive,
    AboveLimit,
}

impl fmt::Display for AmountIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountIssue::Unparseable => write!(f, "amount is not a number"),
            AmountIssue::NotPositive => write!(f, "amount must be greater than zero"),
            AmountIssue::AboveLimit => write!(f, "amount must not exceed 999999.99"),
        }
    }
}

pub fn check_name(raw: &str) -> Result<(), NameIssue> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();

    if len == 0 {
        return Err(NameIssue::Empty);
    }
    if len < NAME_MIN_CHARS {
        return Err(NameIssue::TooShort);
    }
    if len > NAME_MAX_CHARS {
        return Err(NameIssue::TooLong);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_ascii_whitespace())
    {
        return Err(NameIssue::InvalidCharacters);
    }
    Ok(())
}

pub fn validate_name(raw: &str) -> bool {
    check_name(raw).is_ok()
}

/// Title-case each word of a valid name: "  ana   SILVA " -> "Ana Silva".
/// Invalid names are returned unchanged.
pub fn normalize_name(raw: &str) -> String {
    if !validate_name(raw) {
        return raw.to_string();
    }

    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn check_email(raw: &str) -> Result<(), EmailIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EmailIssue::Empty);
    }
    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(EmailIssue::Malformed);
    }
    Ok(())
}

pub fn validate_email(raw: &str) -> bool {
    check_email(raw).is_ok()
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn check_amount(amount: Cents) -> Result<(), AmountIssue> {
    if amount <= 0 {
        Err(AmountIssue::NotPositive)
    } else if amount > MAX_AMOUNT {
        Err(AmountIssue::AboveLimit)
    } else {
        Ok(())
    }
}

/// True when `0 < amount <= 999999.99`.
pub fn validate_amount(amount: Cents) -> bool {
    check_amount(amount).is_ok()
}

pub fn is_non_empty(text: &str) -> bool {
    !text.trim().is_empty()
}
