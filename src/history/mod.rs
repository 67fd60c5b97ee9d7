//! Recent search history
//!
//! Keeps the five most recent search strings, most recent first. Recording
//! a query that is already present moves it to the front; recording a new
//! query past capacity evicts the oldest one.
//!
//! [`HistoryStore`] persists the list as a JSON array and
//! [`SuggestionMenu`] tracks keyboard focus over the suggestions shown under
//! the search box.

mod error;
mod menu;
mod store;

pub use error::HistoryError;
pub use menu::{MenuKey, SuggestionMenu};
pub use store::HistoryStore;

use serde::{Deserialize, Serialize};

/// Number of searches kept
pub const HISTORY_CAPACITY: usize = 5;

/// Most-recently-used list of search strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a history from stored entries
    ///
    /// Entries are trimmed, blanks and later duplicates are dropped and the
    /// list is cut to capacity.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut history = Self::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() || history.entries.iter().any(|e| e == entry) {
                continue;
            }
            if history.entries.len() == HISTORY_CAPACITY {
                break;
            }
            history.entries.push(entry.to_string());
        }
        history
    }

    /// Record a search; blank queries are ignored
    ///
    /// Returns true when the history changed.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        if self.entries.first().is_some_and(|e| e == query) {
            return false;
        }
        self.entries.retain(|e| e != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(HISTORY_CAPACITY);
        true
    }

    /// Entries, most recent first
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries containing `input`, ignoring case
    ///
    /// An empty input matches everything.
    #[must_use]
    pub fn matching(&self, input: &str) -> Vec<&str> {
        let needle = input.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
