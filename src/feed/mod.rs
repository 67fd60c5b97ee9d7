//! Infinite scroll feeds
//!
//! - [`controller`]: the `Idle -> Loading -> Idle / Exhausted` state machine
//! - [`metrics`]: scroll position snapshots and the near-end check
//! - [`worker`]: background fetching for hosts with an event loop
//!
//! [`Feed`] ties a controller to an [`ImageSource`] and runs requests inline,
//! which is what the CLI commands and the tests use.

pub mod controller;
pub mod error;
pub mod metrics;
pub mod worker;

pub use controller::{Completion, FeedPhase, PendingFetch, ScrollController, Ticket};
pub use error::FeedError;
pub use metrics::{DEFAULT_SCROLL_THRESHOLD, ScrollMetrics};
pub use worker::{FetchOutcome, FetchWorker};

use crate::api::{FeedQuery, ImageRecord, ImageSource};

/// A scroll controller driven synchronously against a source
pub struct Feed<S> {
    source: S,
    controller: ScrollController,
}

impl<S: ImageSource> Feed<S> {
    /// Create an empty feed
    #[must_use]
    pub const fn new(source: S, feed: FeedQuery, threshold: u32) -> Self {
        Self {
            source,
            controller: ScrollController::new(feed, threshold),
        }
    }

    /// Underlying controller
    #[must_use]
    pub const fn controller(&self) -> &ScrollController {
        &self.controller
    }

    /// Accumulated images
    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        self.controller.images()
    }

    /// Whether the feed has ended
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.controller.is_exhausted()
    }

    /// React to a scroll position, fetching inline when it triggers
    ///
    /// Returns `Ok(None)` when nothing was requested, `Ok(Some(added))` after
    /// a page was appended.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::PageFailed` if the triggered request failed.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Result<Option<usize>, FeedError> {
        match self.controller.on_scroll(metrics) {
            Some(pending) => self.run(pending),
            None => Ok(None),
        }
    }

    /// Fetch the next page unconditionally (unless loading or exhausted)
    ///
    /// # Errors
    ///
    /// Returns `FeedError::PageFailed` if the request failed.
    pub fn load_next(&mut self) -> Result<Option<usize>, FeedError> {
        match self.controller.request_next() {
            Some(pending) => self.run(pending),
            None => Ok(None),
        }
    }

    /// Load up to `max_pages` pages, stopping early when the feed ends
    ///
    /// # Errors
    ///
    /// Returns `FeedError::PageFailed` on the first failed page.
    pub fn load_pages(&mut self, max_pages: u32) -> Result<usize, FeedError> {
        let mut added = 0;
        for _ in 0..max_pages {
            match self.load_next()? {
                Some(count) => added += count,
                None => break,
            }
        }
        Ok(added)
    }

    fn run(&mut self, pending: PendingFetch) -> Result<Option<usize>, FeedError> {
        let page = pending.ticket.page();
        let result = self.source.fetch_page(&pending.request);
        match self.controller.complete(pending.ticket, result) {
            Completion::Applied { added, .. } => Ok(Some(added)),
            Completion::Failed(message) => Err(FeedError::PageFailed { page, message }),
            Completion::Stale => Ok(None),
        }
    }
}
