use crate::domain::{Cents, DEFAULT_HISTORY_CAPACITY, DEFAULT_STARTING_BALANCE};

/// Knobs for a ledger session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Balance given to every account created at login
    pub starting_balance: Cents,
    /// Maximum number of history entries kept per session
    pub history_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
