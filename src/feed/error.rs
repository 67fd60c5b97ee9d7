//! Feed-specific error types

use crate::api::FetchError;
use thiserror::Error;

/// Errors raised while driving a feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// A page request could not be built or sent
    #[error("Fetch error: {0}")]
    FetchError(#[from] FetchError),

    /// A page came back as a failure; the cursor was not advanced
    #[error("Page {page} failed: {message}")]
    PageFailed {
        /// Page cursor that failed
        page: u32,
        /// Error message reported by the source
        message: String,
    },

    /// The background fetch worker is no longer running
    #[error("Fetch worker has stopped")]
    WorkerStopped,
}
