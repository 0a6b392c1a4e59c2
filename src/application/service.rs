use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    Account, Cents, EntryKind, History, HistoryEntry, format_amount,
    validation::{check_amount, check_email, check_name, is_non_empty, normalize_email, normalize_name},
};

use super::{AppError, LedgerConfig};

/// Application service holding the state of one user session.
/// This is the only interface the shell (or any other client) talks to.
///
/// A service is either logged out (no session) or logged in with exactly one
/// account and its history. Every mutating operation takes `&mut self`.
pub struct LedgerService {
    config: LedgerConfig,
    session: Option<Session>,
}

struct Session {
    account: Account,
    history: History,
}

impl Session {
    fn record(&mut self, kind: EntryKind, description: impl Into<String>) {
        self.history.push(HistoryEntry::new(kind, description));
    }
}

/// Result of a balance query
#[derive(Debug, Clone, Serialize)]
pub struct BalanceView {
    pub account_name: String,
    pub balance: Cents,
    pub last_access_at: DateTime<Utc>,
}

/// Result of a transfer or a receipt
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    pub kind: EntryKind,
    pub amount: Cents,
    /// Destination for transfers, origin for receipts
    pub counterparty: String,
    pub new_balance: Cents,
    pub timestamp: DateTime<Utc>,
}

/// Account details for display
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub balance: Cents,
    pub created_at: DateTime<Utc>,
    pub last_access_at: DateTime<Utc>,
}

/// What is left of a session after logout
#[derive(Debug, Clone)]
pub struct ClosedSession {
    pub account: Account,
    /// Full history including the final logout entry
    pub history: Vec<HistoryEntry>,
}

impl LedgerService {
    /// Create a logged-out service.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    // ========================
    // Session lifecycle
    // ========================

    /// Log in, creating a fresh account for the given name and email.
    ///
    /// Accounts are never kept between sessions, so this always starts from the
    /// configured starting balance. Logging in while a session is active
    /// replaces that session.
    pub fn login_or_create(&mut self, name: &str, email: &str) -> Result<&Account, AppError> {
        let name = normalize_name(name);
        let email = normalize_email(email);

        if let Err(issue) = check_name(&name) {
            warn!(%issue, "login rejected: invalid name");
            return Err(AppError::InvalidName(issue));
        }
        if let Err(issue) = check_email(&email) {
            warn!(%issue, "login rejected: invalid email");
            return Err(AppError::InvalidEmail(issue));
        }

        if let Some(previous) = self.session.take() {
            info!(account_id = %previous.account.id, "replacing active session");
        }

        let account = Account::new(name, email, self.config.starting_balance);
        let mut session = Session {
            account,
            history: History::with_capacity(self.config.history_capacity),
        };
        session.record(
            EntryKind::Login,
            format!(
                "Login - starting balance {}",
                format_amount(session.account.balance())
            ),
        );

        info!(
            account_id = %session.account.id,
            name = %session.account.name,
            "logged in"
        );

        let session = self.session.insert(session);
        Ok(&session.account)
    }

    /// End the active session. Returns `None` if nobody was logged in.
    pub fn logout(&mut self) -> Option<ClosedSession> {
        let mut session = self.session.take()?;
        session.record(EntryKind::Logout, "Logout");

        info!(account_id = %session.account.id, "logged out");

        Some(ClosedSession {
            history: session.history.to_vec(),
            account: session.account,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.session.as_ref().map(|s| &s.account)
    }

    // ========================
    // Queries
    // ========================

    /// Current balance. Every query is recorded in the history.
    pub fn balance(&mut self) -> Result<BalanceView, AppError> {
        let session = self.session_mut()?;
        session.record(EntryKind::Balance, "Balance inquiry");

        debug!(balance = session.account.balance(), "balance queried");

        Ok(BalanceView {
            account_name: session.account.name.clone(),
            balance: session.account.balance(),
            last_access_at: session.account.last_access_at,
        })
    }

    /// History entries, oldest first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, AppError> {
        let session = self.session()?;
        Ok(session.history.to_vec())
    }

    /// Account details. Not recorded in the history.
    pub fn profile(&self) -> Result<ProfileView, AppError> {
        let account = &self.session()?.account;
        Ok(ProfileView {
            name: account.name.clone(),
            email: account.email.clone(),
            balance: account.balance(),
            created_at: account.created_at,
            last_access_at: account.last_access_at,
        })
    }

    // ========================
    // Money movement
    // ========================

    /// Send money out of the account.
    ///
    /// Checks run in a fixed order and the first failure wins: session,
    /// amount range, destination, funds.
    pub fn transfer(
        &mut self,
        amount: Cents,
        destination: &str,
    ) -> Result<TransferReceipt, AppError> {
        let session = self.session_mut()?;

        if let Err(issue) = check_amount(amount) {
            warn!(amount, %issue, "transfer rejected");
            return Err(AppError::InvalidAmount(issue));
        }
        if !is_non_empty(destination) {
            warn!(amount, "transfer rejected: empty destination");
            return Err(AppError::EmptyDestination);
        }
        if !session.account.has_sufficient_funds(amount) {
            warn!(
                amount,
                balance = session.account.balance(),
                "transfer rejected: insufficient funds"
            );
            return Err(AppError::InsufficientFunds {
                balance: session.account.balance(),
                required: amount,
            });
        }

        let destination = destination.trim();
        if !session.account.debit(amount) {
            // has_sufficient_funds passed above, so debit cannot refuse
            return Err(AppError::InsufficientFunds {
                balance: session.account.balance(),
                required: amount,
            });
        }

        session.record(
            EntryKind::Transfer,
            format!("Transfer: {} to {}", format_amount(amount), destination),
        );

        info!(
            amount,
            destination,
            new_balance = session.account.balance(),
            "transfer completed"
        );

        Ok(TransferReceipt {
            kind: EntryKind::Transfer,
            amount,
            counterparty: destination.to_string(),
            new_balance: session.account.balance(),
            timestamp: session.account.last_access_at,
        })
    }

    /// Take money into the account. No funds check applies.
    pub fn receive(&mut self, amount: Cents, origin: &str) -> Result<TransferReceipt, AppError> {
        let session = self.session_mut()?;

        if let Err(issue) = check_amount(amount) {
            warn!(amount, %issue, "receipt rejected");
            return Err(AppError::InvalidAmount(issue));
        }
        if !is_non_empty(origin) {
            warn!(amount, "receipt rejected: empty origin");
            return Err(AppError::EmptyOrigin);
        }

        let origin = origin.trim();
        if !session.account.credit(amount) {
            warn!(
                amount,
                balance = session.account.balance(),
                "receipt rejected: balance limit"
            );
            return Err(AppError::BalanceLimit {
                balance: session.account.balance(),
                amount,
            });
        }
        session.record(
            EntryKind::Receipt,
            format!("Receipt: {} from {}", format_amount(amount), origin),
        );

        info!(
            amount,
            origin,
            new_balance = session.account.balance(),
            "receipt completed"
        );

        Ok(TransferReceipt {
            kind: EntryKind::Receipt,
            amount,
            counterparty: origin.to_string(),
            new_balance: session.account.balance(),
            timestamp: session.account.last_access_at,
        })
    }

    fn session(&self) -> Result<&Session, AppError> {
        self.session.as_ref().ok_or(AppError::NotLoggedIn)
    }

    fn session_mut(&mut self) -> Result<&mut Session, AppError> {
        self.session.as_mut().ok_or(AppError::NotLoggedIn)
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}
