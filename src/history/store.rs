//! JSON file persistence for search history

use super::{HistoryError, SearchHistory};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// History file location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default history file: `<data dir>/scatch/search_history.json`
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NoDataDir` if the system data directory cannot
    /// be determined.
    pub fn default_path() -> Result<PathBuf, HistoryError> {
        let data_dir = dirs::data_local_dir().ok_or(HistoryError::NoDataDir)?;
        Ok(data_dir.join("scatch").join("search_history.json"))
    }

    /// Store at the default location
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NoDataDir` if the system data directory cannot
    /// be determined.
    pub fn open_default() -> Result<Self, HistoryError> {
        Ok(Self::new(Self::default_path()?))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history
    ///
    /// A missing file is an empty history. A file that is not a JSON array
    /// of strings (including one that is not UTF-8) is logged and also
    /// treated as empty, so the next save overwrites it.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Io` if the file exists but cannot be read.
    pub fn load(&self) -> Result<SearchHistory, HistoryError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SearchHistory::new()),
            Err(e) if e.kind() == ErrorKind::InvalidData => return Ok(self.discard(&e)),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Vec<String>>(&raw) {
            Ok(entries) => {
                debug!(count = entries.len(), path = %self.path.display(), "loaded search history");
                Ok(SearchHistory::from_entries(entries))
            }
            Err(e) => Ok(self.discard(&e)),
        }
    }

    fn discard(&self, error: &dyn std::error::Error) -> SearchHistory {
        warn!(path = %self.path.display(), %error, "ignoring malformed search history");
        SearchHistory::new()
    }

    /// Write the history, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the directory or file cannot be written.
    pub fn save(&self, history: &SearchHistory) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(history)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load, record `query`, and save if anything changed
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if loading or saving fails.
    pub fn record(&self, query: &str) -> Result<SearchHistory, HistoryError> {
        let mut history = self.load()?;
        if history.record(query) {
            self.save(&history)?;
        }
        Ok(history)
    }

    /// Remove every entry
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the file cannot be written.
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.save(&SearchHistory::new())
    }
}
