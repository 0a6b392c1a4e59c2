use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of entries kept before the oldest ones are dropped.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Login,
    Balance,
    Transfer,
    Receipt,
    Logout,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Login => "login",
            EntryKind::Balance => "balance",
            EntryKind::Transfer => "transfer",
            EntryKind::Receipt => "receipt",
            EntryKind::Logout => "logout",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: EntryKind,
    pub description: String,
}

impl HistoryEntry {
    pub fn new(kind: EntryKind, description: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            description: description.into(),
        }
    }
}

/// Chronological log of session events, bounded to `capacity` entries.
/// Pushing past capacity evicts from the front.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(EntryKind::Balance, format!("entry {}", n))
    }

    #[test]
    fn test_push_keeps_order() {
        let mut history = History::default();
        history.push(entry(1));
        history.push(entry(2));

        let descriptions: Vec<_> = history.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["entry 1", "entry 2"]);
    }

    #[test]
    fn test_51st_entry_evicts_oldest() {
        let mut history = History::default();
        for n in 1..=51 {
            history.push(entry(n));
        }

        assert_eq!(history.len(), 50);
        assert_eq!(history.iter().next().unwrap().description, "entry 2");
        assert_eq!(history.iter().last().unwrap().description, "entry 51");
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut history = History::with_capacity(0);
        history.push(entry(1));
        history.push(entry(2));

        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.iter().next().unwrap().description, "entry 2");
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.push(entry(1));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_entry_kind_serializes_lowercase() {
        let json = serde_json::to_string(&EntryKind::Receipt).unwrap();
        assert_eq!(json, "\"receipt\"");
    }
}
