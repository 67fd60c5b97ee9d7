//! Image API error types
//!
//! Errors raised while building upstream requests, talking to the remote
//! image API, or decoding its responses. None of these are retried; they
//! surface to whichever controller issued the request.

use thiserror::Error;

/// Errors from fetching a page (or a single photo) of images
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error payload or reason phrase
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Endpoint name is not one the proxy forwards
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// Orientation filter outside the accepted set
    #[error("Invalid orientation '{0}' (expected all, landscape, portrait or square)")]
    InvalidOrientation(String),

    /// Page cursor is not a positive number
    #[error("Invalid page '{0}'")]
    InvalidPage(String),

    /// Search endpoint called without a query
    #[error("Search requires a non-empty query")]
    MissingQuery,

    /// Upstream base URL could not be parsed or joined
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Source cannot serve this kind of feed
    #[error("Feed '{0}' is not served by this source")]
    UnsupportedFeed(String),

    /// Local library could not serve the page
    #[error("Library error: {0}")]
    Local(String),
}

impl FetchError {
    /// HTTP status the proxy answers with for this error
    #[must_use]
    pub const fn proxy_status(&self) -> u16 {
        match self {
            Self::UnknownEndpoint(_)
            | Self::InvalidOrientation(_)
            | Self::InvalidPage(_)
            | Self::MissingQuery => 400,
            _ => 500,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
