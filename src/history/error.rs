//! Search history errors

use thiserror::Error;

/// Errors raised while persisting search history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Reading or writing the history file failed
    #[error("History file error: {0}")]
    Io(#[from] std::io::Error),

    /// The history could not be serialized
    #[error("Error while serializing history: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No data directory is available for the default history file
    #[error("Could not determine data directory")]
    NoDataDir,
}
