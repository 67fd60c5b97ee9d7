//! UI error types

use thiserror::Error;

/// Errors that can occur while running the gallery
#[derive(Debug, Error)]
pub enum UiError {
    /// Background fetching stopped while the gallery was running
    #[error("Fetch worker stopped")]
    WorkerStopped,

    /// Invalid configuration
    #[error("Invalid UI configuration: {0}")]
    InvalidConfig(String),

    /// IO error during UI operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let err: UiError = std::io::Error::other("tty gone").into();
        assert!(matches!(err, UiError::IoError(_)));
        assert_eq!(err.to_string(), "IO error: tty gone");
    }

    #[test]
    fn test_messages() {
        assert_eq!(UiError::WorkerStopped.to_string(), "Fetch worker stopped");
        assert_eq!(
            UiError::InvalidConfig("card_height must be at least 3".into()).to_string(),
            "Invalid UI configuration: card_height must be at least 3"
        );
    }
}
