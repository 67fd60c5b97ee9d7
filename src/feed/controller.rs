//! Infinite scroll controller
//!
//! A small state machine: `Idle -> Loading -> Idle`, ending in `Exhausted`
//! once a page reports that nothing follows. At most one request is in
//! flight, so pages are appended in request order.
//!
//! The controller does no I/O. It hands out a [`PendingFetch`] when a
//! request should be made and expects the outcome back through
//! [`ScrollController::complete`]. Every request carries a [`Ticket`]; after
//! [`ScrollController::cancel`] or [`ScrollController::reset`] older tickets
//! are stale and their results are dropped.

use super::metrics::ScrollMetrics;
use crate::api::{FeedQuery, FetchError, ImagePage, ImageRecord, PageRequest};
use tracing::{debug, warn};

/// Identifies one in-flight page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
    page: u32,
}

impl Ticket {
    /// Page cursor this ticket was issued for
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }
}

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Waiting for a trigger
    Idle,
    /// One request is in flight
    Loading(Ticket),
    /// The last page said nothing follows; terminal
    Exhausted,
}

/// A request the host should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    /// Ticket to hand back with the result
    pub ticket: Ticket,
    /// What to fetch
    pub request: PageRequest,
}

/// What happened when a result was handed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Images were appended
    Applied {
        /// Number of images appended
        added: usize,
        /// Whether the feed is now exhausted
        exhausted: bool,
    },
    /// The request failed; the cursor stays put
    Failed(String),
    /// The ticket no longer matches the in-flight request
    Stale,
}

/// Accumulates pages of a feed as the user scrolls
#[derive(Debug, Clone)]
pub struct ScrollController {
    feed: FeedQuery,
    images: Vec<ImageRecord>,
    next_page: u32,
    has_more: bool,
    phase: FeedPhase,
    threshold: u32,
    generation: u64,
    last_error: Option<String>,
}

impl ScrollController {
    /// Empty controller; the first request asks for page 1
    #[must_use]
    pub const fn new(feed: FeedQuery, threshold: u32) -> Self {
        Self {
            feed,
            images: Vec::new(),
            next_page: 1,
            has_more: true,
            phase: FeedPhase::Idle,
            threshold,
            generation: 0,
            last_error: None,
        }
    }

    /// Controller seeded with an already-fetched first page
    #[must_use]
    pub fn with_initial(feed: FeedQuery, first: ImagePage, threshold: u32) -> Self {
        let phase = if first.has_more {
            FeedPhase::Idle
        } else {
            FeedPhase::Exhausted
        };
        Self {
            feed,
            images: first.images,
            next_page: first.next_cursor.max(2),
            has_more: first.has_more,
            phase,
            threshold,
            generation: 0,
            last_error: None,
        }
    }

    /// Feed being paged
    #[must_use]
    pub const fn feed(&self) -> &FeedQuery {
        &self.feed
    }

    /// Accumulated images, in arrival order
    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Number of accumulated images
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether nothing has been accumulated yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// Whether a request is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, FeedPhase::Loading(_))
    }

    /// Whether the feed has ended
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.phase, FeedPhase::Exhausted)
    }

    /// Whether more pages are believed to exist
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Cursor the next request will use
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Distance from the bottom that triggers a request
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Message of the most recent failed request, cleared on success
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// React to a scroll position change
    ///
    /// Returns a request only when the viewport is near the end, more pages
    /// exist and nothing is in flight.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<PendingFetch> {
        if !metrics.near_end(self.threshold) {
            return None;
        }
        self.request_next()
    }

    /// Request the next page regardless of scroll position
    ///
    /// Same guards as [`Self::on_scroll`]: ignored while loading or exhausted.
    pub fn request_next(&mut self) -> Option<PendingFetch> {
        if self.phase != FeedPhase::Idle || !self.has_more {
            return None;
        }

        let ticket = Ticket {
            generation: self.generation,
            page: self.next_page,
        };
        self.phase = FeedPhase::Loading(ticket);
        debug!(feed = %self.feed.label(), page = ticket.page, "feed loading");

        Some(PendingFetch {
            ticket,
            request: PageRequest::new(self.feed.clone(), ticket.page),
        })
    }

    /// Hand back the outcome of a request issued by this controller
    pub fn complete(&mut self, ticket: Ticket, result: Result<ImagePage, FetchError>) -> Completion {
        if self.phase != FeedPhase::Loading(ticket) {
            debug!(page = ticket.page, "discarding stale page result");
            return Completion::Stale;
        }

        match result {
            Ok(page) => {
                let added = page.images.len();
                self.images.extend(page.images);
                self.next_page = ticket.page.saturating_add(1);
                self.has_more = page.has_more;
                self.last_error = None;
                self.phase = if self.has_more {
                    FeedPhase::Idle
                } else {
                    FeedPhase::Exhausted
                };
                debug!(
                    page = ticket.page,
                    added,
                    total = self.images.len(),
                    exhausted = !self.has_more,
                    "page appended"
                );
                Completion::Applied {
                    added,
                    exhausted: !self.has_more,
                }
            }
            Err(e) => {
                warn!(page = ticket.page, error = %e, "page request failed");
                let message = e.to_string();
                self.last_error = Some(message.clone());
                self.phase = FeedPhase::Idle;
                Completion::Failed(message)
            }
        }
    }

    /// Abandon the in-flight request, if any
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.is_loading() {
            debug!(feed = %self.feed.label(), "in-flight page cancelled");
            self.phase = FeedPhase::Idle;
        }
    }

    /// Switch to another feed, dropping everything accumulated so far
    pub fn reset(&mut self, feed: FeedQuery) {
        self.cancel();
        self.feed = feed;
        self.images.clear();
        self.next_page = 1;
        self.has_more = true;
        self.phase = FeedPhase::Idle;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PER_PAGE;
    use crate::testing::page_of;

    const NEAR: ScrollMetrics = ScrollMetrics::new(4000, 800, 5000);
    const FAR: ScrollMetrics = ScrollMetrics::new(0, 800, 5000);

    fn controller() -> ScrollController {
        ScrollController::new(FeedQuery::search("cats"), 860)
    }

    #[test]
    fn test_far_from_end_does_not_trigger() {
        let mut c = controller();
        assert!(c.on_scroll(FAR).is_none());
        assert_eq!(c.phase(), FeedPhase::Idle);
    }

    #[test]
    fn test_near_end_triggers_first_page() {
        let mut c = controller();
        let pending = c.on_scroll(NEAR).unwrap();
        assert_eq!(pending.request.page, 1);
        assert_eq!(pending.request.feed, FeedQuery::search("cats"));
        assert!(c.is_loading());
    }

    #[test]
    fn test_second_trigger_while_loading_is_ignored() {
        let mut c = controller();
        let first = c.on_scroll(NEAR);
        assert!(first.is_some());
        assert!(c.on_scroll(NEAR).is_none());
        assert!(c.request_next().is_none());
    }

    #[test]
    fn test_full_page_returns_to_idle_and_advances_cursor() {
        let mut c = controller();
        let pending = c.on_scroll(NEAR).unwrap();
        let outcome = c.complete(pending.ticket, Ok(page_of(PER_PAGE, 0, 1)));

        assert_eq!(outcome, Completion::Applied { added: PER_PAGE, exhausted: false });
        assert_eq!(c.phase(), FeedPhase::Idle);
        assert_eq!(c.next_page(), 2);
        assert_eq!(c.len(), PER_PAGE);
    }

    #[test]
    fn test_short_page_exhausts_feed() {
        let mut c = controller();
        let pending = c.request_next().unwrap();
        c.complete(pending.ticket, Ok(page_of(3, 0, 1)));

        assert!(c.is_exhausted());
        assert!(c.on_scroll(NEAR).is_none());
        assert!(c.request_next().is_none());
    }

    #[test]
    fn test_pages_append_in_arrival_order_without_dedup() {
        let mut c = controller();
        let first = c.request_next().unwrap();
        c.complete(first.ticket, Ok(page_of(PER_PAGE, 100, 1)));
        let second = c.request_next().unwrap();
        c.complete(second.ticket, Ok(page_of(2, 100, 2)));

        let ids: Vec<u64> = c.images().iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), PER_PAGE + 2);
        assert_eq!(ids[0], 100);
        assert_eq!(ids[PER_PAGE], 100);
    }

    #[test]
    fn test_failure_keeps_cursor_and_allows_manual_retry() {
        let mut c = controller();
        let pending = c.request_next().unwrap();
        let outcome = c.complete(pending.ticket, Err(FetchError::Decode("bad json".into())));

        assert!(matches!(outcome, Completion::Failed(_)));
        assert_eq!(c.phase(), FeedPhase::Idle);
        assert_eq!(c.next_page(), 1);
        assert!(c.last_error().unwrap().contains("bad json"));

        let retry = c.on_scroll(NEAR).unwrap();
        assert_eq!(retry.request.page, 1);
        c.complete(retry.ticket, Ok(page_of(PER_PAGE, 0, 1)));
        assert!(c.last_error().is_none());
    }

    #[test]
    fn test_cancelled_result_is_stale() {
        let mut c = controller();
        let pending = c.request_next().unwrap();
        c.cancel();

        assert_eq!(c.phase(), FeedPhase::Idle);
        let outcome = c.complete(pending.ticket, Ok(page_of(PER_PAGE, 0, 1)));
        assert_eq!(outcome, Completion::Stale);
        assert!(c.is_empty());
    }

    #[test]
    fn test_reissued_request_after_cancel_gets_new_ticket() {
        let mut c = controller();
        let old = c.request_next().unwrap();
        c.cancel();
        let new = c.request_next().unwrap();

        assert_eq!(old.request.page, new.request.page);
        assert_ne!(old.ticket, new.ticket);
        assert_eq!(c.complete(old.ticket, Ok(page_of(1, 0, 1))), Completion::Stale);
        assert!(matches!(
            c.complete(new.ticket, Ok(page_of(1, 0, 1))),
            Completion::Applied { added: 1, .. }
        ));
    }

    #[test]
    fn test_reset_switches_feed() {
        let mut c = controller();
        let pending = c.request_next().unwrap();
        c.complete(pending.ticket, Ok(page_of(2, 0, 1)));
        assert!(c.is_exhausted());

        c.reset(FeedQuery::search("dogs"));
        assert!(c.is_empty());
        assert_eq!(c.phase(), FeedPhase::Idle);
        let pending = c.request_next().unwrap();
        assert_eq!(pending.request, PageRequest::new(FeedQuery::search("dogs"), 1));
    }

    #[test]
    fn test_seeded_controller_continues_at_page_two() {
        let mut c = ScrollController::with_initial(FeedQuery::curated(), page_of(PER_PAGE, 0, 1), 860);
        assert_eq!(c.len(), PER_PAGE);
        assert_eq!(c.request_next().unwrap().request.page, 2);

        let done = ScrollController::with_initial(FeedQuery::curated(), page_of(4, 0, 1), 860);
        assert!(done.is_exhausted());
    }
}
