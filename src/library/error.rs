//! Library-specific error types
//!
//! Errors raised while reading or writing the local album and favorite
//! store.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`** / **`EncodeError`**: bincode failures on stored images
//! - **`CorruptKey`**: A stored key or value has an unexpected shape
//! - **`NotFound`**: An album or image that does not exist
//! - **`InvalidInput`**: Bad album names or page cursors

use thiserror::Error;

/// Library errors
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Stored key or value has an unexpected length
    #[error("Corrupt library entry in '{0}'")]
    CorruptKey(&'static str),

    /// Album or image does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input provided (e.g., empty album name)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
