//! Gallery state
//!
//! Everything the gallery draws from: the scroll controller's images, the
//! cached column layout, the modal navigator and its zoom view, the search
//! input with history suggestions, and transient status messages.

use crate::api::{FeedQuery, ImageRecord, Orientation};
use crate::config::UiConfig;
use crate::feed::{PendingFetch, ScrollController, ScrollMetrics};
use crate::history::{MenuKey, SearchHistory, SuggestionMenu};
use crate::layout::{ColumnLayout, LayoutAssignment, LayoutCache};
use crate::modal::{
    Bounds, Location, MemoryHistory, ModalNavigator, ModalState, NavigationHistory, ZoomView,
};
use ratatui::layout::{Position, Rect};
use crate::ui::error::{Result, UiError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Smallest card that fits a border and the credit line
const MIN_CARD_HEIGHT: u16 = 3;

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// Which input has the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Grid or open modal
    #[default]
    Browse,
    /// Typing in the search bar
    Search,
    /// Typing an album name for the targeted image
    AlbumPrompt,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    pub created_at: Instant,
}

impl StatusMessage {
    #[must_use]
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Album prompt contents
#[derive(Debug, Clone, Default)]
pub struct AlbumPrompt {
    /// Image the album save applies to
    pub index: usize,
    /// Name typed so far
    pub input: String,
    /// Existing album names, shown as hints
    pub existing: Vec<String>,
}

/// Mutable state behind the gallery screen
#[derive(Debug)]
pub struct GalleryState {
    /// Accumulated feed
    pub controller: ScrollController,
    /// Modal location history
    pub navigator: ModalNavigator<MemoryHistory>,
    layout: LayoutCache,
    orientation: Orientation,
    zoom: Option<(u64, ZoomView)>,
    /// Recent searches
    pub history: SearchHistory,
    /// Focus over the visible suggestions
    pub menu: SuggestionMenu,
    /// Search bar text
    pub query: String,
    /// Current input mode
    pub mode: Mode,
    /// Album prompt, while [`Mode::AlbumPrompt`] is active
    pub album_prompt: Option<AlbumPrompt>,
    /// Selected grid index
    pub cursor: usize,
    /// First grid row on screen
    pub scroll_row: usize,
    /// Height of one card in terminal rows
    pub card_height: u16,
    grid_width: u16,
    grid_height: u16,
    /// Card hit areas from the last frame
    pub card_areas: Vec<(Rect, usize)>,
    /// Modal frame from the last frame
    pub modal_area: Option<Rect>,
    /// Image container inside the modal from the last frame
    pub image_area: Option<Rect>,
    /// Whether the open image is a favorite (refreshed by the app)
    pub modal_favorite: bool,
    /// Set after a failed page; cleared by the next user scroll
    pub fetch_paused: bool,
    /// Status messages
    pub messages: Vec<StatusMessage>,
    /// Message TTL for auto-expiry
    pub message_ttl: Duration,
    /// Whether the gallery should exit
    pub should_exit: bool,
}

impl GalleryState {
    /// State for a gallery starting on `feed`
    ///
    /// # Errors
    ///
    /// Returns `UiError::InvalidConfig` when a card is too short to hold its
    /// border and credit line, or the minimum column width is zero.
    pub fn new(feed: FeedQuery, ui: &UiConfig, history: SearchHistory) -> Result<Self> {
        if ui.card_height < MIN_CARD_HEIGHT {
            return Err(UiError::InvalidConfig(format!(
                "card_height must be at least {MIN_CARD_HEIGHT} (got {})",
                ui.card_height
            )));
        }
        if ui.min_column_width == 0 {
            return Err(UiError::InvalidConfig("min_column_width must be positive".into()));
        }
        let (query, orientation) = match &feed {
            FeedQuery::Search { query, orientation } => (query.clone(), *orientation),
            FeedQuery::Curated { orientation } => (String::new(), *orientation),
            FeedQuery::Album(_) | FeedQuery::Favorites => (String::new(), Orientation::All),
        };
        let start = Location::new(feed.route());

        Ok(Self {
            controller: ScrollController::new(feed, ui.scroll_threshold),
            navigator: ModalNavigator::new(MemoryHistory::new(start)),
            layout: LayoutCache::new(ColumnLayout::new(ui.min_column_width)),
            orientation,
            zoom: None,
            menu: SuggestionMenu::new(history.len()),
            history,
            query,
            mode: Mode::Browse,
            album_prompt: None,
            cursor: 0,
            scroll_row: 0,
            card_height: ui.card_height,
            grid_width: 0,
            grid_height: 0,
            card_areas: Vec::new(),
            modal_area: None,
            image_area: None,
            modal_favorite: false,
            fetch_paused: false,
            messages: Vec::new(),
            message_ttl: Duration::from_secs(5),
            should_exit: false,
        })
    }

    /// Images loaded so far
    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        self.controller.images()
    }

    /// Orientation applied to new searches
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Column assignment for the current grid width
    #[must_use]
    pub fn assignment(&self) -> Arc<LayoutAssignment> {
        self.layout.assign(u32::from(self.grid_width), self.images().len())
    }

    /// Record the grid area size for the current frame
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        if self.grid_width != width || self.grid_height != height {
            self.grid_width = width;
            self.grid_height = height;
            self.ensure_cursor_visible();
        }
    }

    /// Number of whole card rows that fit on screen
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        usize::from((self.grid_height / self.card_height).max(1))
    }

    /// Scroll position in terminal rows
    #[must_use]
    pub fn scroll_metrics(&self) -> ScrollMetrics {
        let card = u32::from(self.card_height);
        let rows = u32::try_from(self.assignment().rows()).unwrap_or(u32::MAX);
        let offset = u32::try_from(self.scroll_row).unwrap_or(u32::MAX);
        ScrollMetrics::new(
            offset.saturating_mul(card),
            u32::from(self.grid_height),
            rows.saturating_mul(card),
        )
    }

    /// Next page request, if the viewport is close enough to the end
    pub fn poll_more(&mut self) -> Option<PendingFetch> {
        if self.fetch_paused {
            return None;
        }
        let metrics = self.scroll_metrics();
        self.controller.on_scroll(metrics)
    }

    // Grid navigation

    /// Move the selection by whole cells
    pub fn move_cursor(&mut self, columns: isize, rows: isize) {
        let len = self.images().len();
        if len == 0 {
            return;
        }
        let per_row = self.assignment().column_count().max(1);
        let delta = rows.saturating_mul(per_row as isize).saturating_add(columns);
        let target = self.cursor.saturating_add_signed(delta).min(len - 1);
        if delta < 0 && self.cursor == 0 {
            return;
        }
        self.cursor = target;
        self.fetch_paused = false;
        self.ensure_cursor_visible();
    }

    /// Jump to the first image
    pub fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.ensure_cursor_visible();
    }

    /// Jump to the last loaded image
    pub fn jump_to_end(&mut self) {
        self.cursor = self.images().len().saturating_sub(1);
        self.fetch_paused = false;
        self.ensure_cursor_visible();
    }

    /// Scroll the grid without moving the selection
    pub fn scroll_by(&mut self, rows: isize) {
        let last = self.assignment().rows().saturating_sub(1);
        self.scroll_row = self.scroll_row.saturating_add_signed(rows).min(last);
        self.fetch_paused = false;
    }

    /// Adjust scroll offset to keep the cursor visible
    fn ensure_cursor_visible(&mut self) {
        let per_row = self.assignment().column_count().max(1);
        let row = self.cursor / per_row;
        let visible = self.visible_rows();
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible {
            self.scroll_row = row + 1 - visible;
        }
    }

    /// Grid index under a terminal cell
    #[must_use]
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let point = Position::new(column, row);
        self.card_areas
            .iter()
            .find(|(area, _)| area.contains(point))
            .map(|(_, index)| *index)
    }

    // Modal

    /// Modal state read back from the current location
    #[must_use]
    pub fn modal_state(&self) -> ModalState {
        self.navigator.state(self.images())
    }

    /// Open the modal on `index`
    pub fn open_modal(&mut self, index: usize) -> bool {
        let opened = self.navigator.open(self.controller.images(), index);
        if opened {
            self.cursor = index;
            self.sync_modal();
        }
        opened
    }

    /// Step to the next image in the modal
    pub fn modal_next(&mut self) -> bool {
        let moved = self.navigator.next(self.controller.images());
        self.sync_modal();
        moved
    }

    /// Step to the previous image in the modal
    pub fn modal_prev(&mut self) -> bool {
        let moved = self.navigator.prev(self.controller.images());
        self.sync_modal();
        moved
    }

    /// Close the modal
    pub fn close_modal(&mut self) -> bool {
        let closed = self.navigator.close();
        self.sync_modal();
        closed
    }

    /// Move back through location history
    pub fn history_back(&mut self) -> bool {
        let moved = self.navigator.history_mut().back();
        self.sync_modal();
        moved
    }

    /// Move forward through location history
    pub fn history_forward(&mut self) -> bool {
        let moved = self.navigator.history_mut().forward();
        self.sync_modal();
        moved
    }

    /// Align cursor and zoom with whatever the location now shows
    fn sync_modal(&mut self) {
        match self.modal_state() {
            ModalState::Open { index, id, .. } => {
                self.cursor = index;
                self.ensure_cursor_visible();
                if self.zoom.is_none_or(|(zoom_id, _)| zoom_id != id) {
                    let image = &self.images()[index];
                    self.zoom = Some((id, ZoomView::new(image.width, image.height)));
                }
            }
            ModalState::Closed => {
                self.zoom = None;
                self.image_area = None;
                self.modal_area = None;
            }
        }
    }

    /// Zoom view of the open image
    #[must_use]
    pub fn zoom(&self) -> Option<&ZoomView> {
        self.zoom.as_ref().map(|(_, zoom)| zoom)
    }

    /// Toggle zoom on the open image
    pub fn toggle_zoom(&mut self) -> bool {
        self.zoom.as_mut().is_some_and(|(_, zoom)| zoom.toggle())
    }

    /// Pan the zoomed image toward a pointer position
    pub fn pan(&mut self, column: u16, row: u16) {
        let Some(area) = self.image_area else {
            return;
        };
        if let Some((_, zoom)) = self.zoom.as_mut() {
            let container = Bounds::new(
                f32::from(area.x),
                f32::from(area.y),
                f32::from(area.width),
                f32::from(area.height),
            );
            zoom.pointer_moved((f32::from(column), f32::from(row)), container);
        }
    }

    /// Image the keyboard actions apply to: the modal image, else the cursor
    #[must_use]
    pub fn target_index(&self) -> Option<usize> {
        self.modal_state()
            .index()
            .or_else(|| (self.cursor < self.images().len()).then_some(self.cursor))
    }

    // Search

    /// Focus the search bar
    pub fn begin_search(&mut self) {
        self.mode = Mode::Search;
        self.refresh_suggestions();
    }

    /// History entries matching the typed text
    #[must_use]
    pub fn suggestions(&self) -> Vec<&str> {
        self.history.matching(&self.query)
    }

    /// Reset suggestion focus after the input or history changed
    pub fn refresh_suggestions(&mut self) {
        self.menu = SuggestionMenu::new(self.suggestions().len());
    }

    pub fn query_push(&mut self, c: char) {
        self.query.push(c);
        self.refresh_suggestions();
    }

    pub fn query_backspace(&mut self) {
        self.query.pop();
        self.refresh_suggestions();
    }

    /// Move suggestion focus
    pub fn suggestion_key(&mut self, key: MenuKey) -> Option<usize> {
        self.menu.handle_key(key)
    }

    /// Feed for the search bar contents
    ///
    /// A focused suggestion replaces the typed text. Blank input means the
    /// curated feed.
    pub fn submit_search(&mut self) -> FeedQuery {
        let selected = self
            .suggestion_key(MenuKey::Enter)
            .and_then(|i| self.suggestions().get(i).map(|s| (*s).to_string()));
        if let Some(entry) = selected {
            self.query = entry;
        }
        self.mode = Mode::Browse;
        self.feed_for_query()
    }

    fn feed_for_query(&self) -> FeedQuery {
        let query = self.query.trim();
        if query.is_empty() {
            FeedQuery::Curated {
                orientation: self.orientation,
            }
        } else {
            FeedQuery::Search {
                query: query.to_string(),
                orientation: self.orientation,
            }
        }
    }

    /// Advance the orientation filter; returns the feed to reload
    pub fn cycle_orientation(&mut self) -> FeedQuery {
        let all = Orientation::ALL;
        let current = all.iter().position(|o| *o == self.orientation).unwrap_or(0);
        self.orientation = all[(current + 1) % all.len()];
        self.feed_for_query()
    }

    /// Replace the feed and start over at the top
    ///
    /// Results still in flight for the old feed are discarded by the
    /// controller when they arrive. Location history starts over at the new
    /// feed's route, since older entries index into images that are gone.
    pub fn switch_feed(&mut self, feed: FeedQuery) {
        self.navigator = ModalNavigator::new(MemoryHistory::new(Location::new(feed.route())));
        self.controller.reset(feed);
        self.cursor = 0;
        self.scroll_row = 0;
        self.fetch_paused = false;
        self.mode = Mode::Browse;
        self.sync_modal();
        self.refresh_suggestions();
    }

    // Album prompt

    /// Ask for an album name for `index`
    pub fn begin_album_prompt(&mut self, index: usize, existing: Vec<String>) {
        self.album_prompt = Some(AlbumPrompt {
            index,
            input: String::new(),
            existing,
        });
        self.mode = Mode::AlbumPrompt;
    }

    /// Close the album prompt, returning its target and trimmed name
    pub fn finish_album_prompt(&mut self) -> Option<(usize, String)> {
        self.mode = Mode::Browse;
        let prompt = self.album_prompt.take()?;
        let name = prompt.input.trim();
        (!name.is_empty()).then(|| (prompt.index, name.to_string()))
    }

    pub fn cancel_album_prompt(&mut self) {
        self.album_prompt = None;
        self.mode = Mode::Browse;
    }

    // Messages

    /// Add a status message
    pub fn push_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text));
        if self.messages.len() > 10 {
            self.messages.remove(0);
        }
    }

    /// Drop messages past their TTL
    pub fn expire_messages(&mut self) {
        let ttl = self.message_ttl;
        self.messages.retain(|m| !m.is_expired(ttl));
    }

    /// Most recent message, if any
    #[must_use]
    pub fn latest_message(&self) -> Option<&StatusMessage> {
        self.messages.last()
    }
}
