use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type AccountId = Uuid;

/// Balance every freshly created account starts with (1250.00).
pub const DEFAULT_STARTING_BALANCE: Cents = 125_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    /// Never negative: `debit` is the only way down and it refuses overdrafts
    balance: Cents,
    pub created_at: DateTime<Utc>,
    pub last_access_at: DateTime<Utc>,
}

impl Account {
    /// Create an account. `name` and `email` are expected to be normalized already.
    pub fn new(name: String, email: String, starting_balance: Cents) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            balance: starting_balance.max(0),
            created_at: now,
            last_access_at: now,
        }
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn has_sufficient_funds(&self, amount: Cents) -> bool {
        amount > 0 && self.balance >= amount
    }

    /// Subtract `amount` if the balance covers it. Returns false and leaves
    /// the account untouched otherwise.
    pub fn debit(&mut self, amount: Cents) -> bool {
        if !self.has_sufficient_funds(amount) {
            return false;
        }
        self.balance -= amount;
        self.touch();
        true
    }

    /// Add `amount` to the balance. Returns false, leaving the account
    /// untouched, for non-positive amounts or when the sum would overflow.
    pub fn credit(&mut self, amount: Cents) -> bool {
        if amount <= 0 {
            return false;
        }
        let Some(balance) = self.balance.checked_add(amount) else {
            return false;
        };
        self.balance = balance;
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.last_access_at = Utc::now();
    }
}
