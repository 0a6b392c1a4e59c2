use std::fmt;

/// Amounts are whole cents: 1250.00 is stored as 125_000.
pub type Cents = i64;

/// Largest amount accepted by a single transfer or receipt (999999.99).
pub const MAX_AMOUNT: Cents = 99_999_999;

/// Render an amount with two decimals and a `.` separator, e.g. "950.00".
pub fn format_amount(amount: Cents) -> String {
    let magnitude = amount.unsigned_abs();
    format!(
        "{}{}.{:02}",
        if amount < 0 { "-" } else { "" },
        magnitude / 100,
        magnitude % 100
    )
}

/// Parse a decimal amount typed by the user into cents.
///
/// Both `.` and `,` are accepted as decimal separator, so "12,5" and "12.5"
/// both yield 1250. More than two decimal digits are truncated.
pub fn parse_amount(input: &str) -> Result<Cents, ParseAmountError> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let (negative, digits) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, normalized.as_str()),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (digits, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !decimal_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ParseAmountError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseAmountError::Overflow)?
    };

    // Pad or truncate the fractional part to exactly two digits
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => decimal_str.parse::<i64>().unwrap_or(0) * 10,
        _ => decimal_str[..2].parse().unwrap_or(0),
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseAmountError::Overflow)?;

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "no amount given"),
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
