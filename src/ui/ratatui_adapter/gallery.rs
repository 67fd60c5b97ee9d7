//! Gallery app loop
//!
//! Owns the terminal, the fetch worker and the local stores. Each turn of
//! the loop drains finished page fetches into the controller, asks the
//! controller whether the viewport needs another page, draws a frame and
//! handles at most one terminal event.

use super::events::{self, Action};
use super::state::{GalleryState, MessageLevel, Mode};
use super::theme::Theme;
use super::widgets::{
    AlbumPromptBox, HelpBar, ImageCard, ImageModal, SearchBar, StatusBar, SuggestionList,
    card_rects, fit_image, modal_layout,
};
use crate::api::FeedQuery;
use crate::feed::{Completion, FeedPhase, FetchOutcome, FetchWorker};
use crate::history::HistoryStore;
use crate::library::Library;
use crate::modal::ModalState;
use crate::ui::error::{Result, UiError};
use crossterm::{
    event::{self as term_event, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::{Paragraph, Widget},
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info, warn};

const EVENT_POLL: Duration = Duration::from_millis(50);

/// Full-screen gallery
pub struct GalleryApp {
    state: GalleryState,
    worker: FetchWorker,
    library: Library,
    history: HistoryStore,
    theme: Theme,
}

impl GalleryApp {
    /// Create a gallery over a started worker and the local stores
    #[must_use]
    pub fn new(state: GalleryState, worker: FetchWorker, library: Library, history: HistoryStore) -> Self {
        Self {
            state,
            worker,
            library,
            history,
            theme: Theme::default(),
        }
    }

    /// Set a custom theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Setup terminal for TUI mode
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Restore terminal to normal mode
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Run until the user quits
    ///
    /// # Errors
    ///
    /// Returns `UiError` if the terminal cannot be driven or the fetch
    /// worker stops. The terminal is restored either way.
    pub fn run(mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        info!(feed = %self.state.controller.feed().label(), "gallery started");

        let result = self.run_loop(&mut terminal);
        let cleanup = Self::cleanup_terminal();
        terminal.show_cursor().ok();

        self.worker.cancel();
        if let Err(e) = self.library.flush() {
            warn!(error = %e, "failed to flush library");
        }
        info!("gallery closed");
        result.and(cleanup)
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            self.state.expire_messages();
            while let Some(outcome) = self.worker.try_recv() {
                self.apply(outcome);
            }
            if let Some(pending) = self.state.poll_more() {
                self.worker.submit(pending).map_err(|_| UiError::WorkerStopped)?;
            }
            self.refresh_favorite();

            terminal.draw(|frame| render(frame, &mut self.state, &self.theme))?;

            if term_event::poll(EVENT_POLL)? {
                let event = term_event::read()?;
                let action = events::handle_event(&mut self.state, &event);
                self.perform(action);
            }
            if self.state.should_exit {
                return Ok(());
            }
        }
    }

    /// Hand a finished fetch to the controller and report the outcome
    fn apply(&mut self, outcome: FetchOutcome) {
        match self.state.controller.complete(outcome.ticket, outcome.result) {
            Completion::Applied { added, exhausted } => {
                if self.state.images().is_empty() {
                    self.state.push_message(MessageLevel::Info, "No images found");
                } else if exhausted {
                    let total = self.state.images().len();
                    self.state
                        .push_message(MessageLevel::Info, format!("End of results ({total} images)"));
                }
                debug!(added, exhausted, "gallery page applied");
            }
            Completion::Failed(message) => {
                self.state.fetch_paused = true;
                self.state
                    .push_message(MessageLevel::Error, format!("Could not load more: {message}"));
            }
            Completion::Stale => {}
        }
    }

    fn refresh_favorite(&mut self) {
        self.state.modal_favorite = match self.state.modal_state() {
            ModalState::Open { id, .. } => self.library.is_favorite(id).unwrap_or(false),
            ModalState::Closed => false,
        };
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.state.should_exit = true,
            Action::Search(feed) => self.search(feed),
            Action::PromptAlbum(index) => {
                let existing = match self.library.list_albums() {
                    Ok(albums) => albums.into_iter().map(|a| a.name).collect(),
                    Err(e) => {
                        warn!(error = %e, "failed to list albums");
                        Vec::new()
                    }
                };
                self.state.begin_album_prompt(index, existing);
            }
            Action::SaveToAlbum { album, index } => self.save_to_album(&album, index),
            Action::ToggleFavorite(index) => self.toggle_favorite(index),
            Action::OpenDownload(index) => self.open_download(index),
        }
    }

    fn search(&mut self, feed: FeedQuery) {
        if let FeedQuery::Search { query, .. } = &feed {
            match self.history.record(query) {
                Ok(history) => self.state.history = history,
                Err(e) => {
                    warn!(error = %e, "failed to save search history");
                    self.state.history.record(query);
                }
            }
        }
        info!(feed = %feed.label(), "switching feed");
        self.state.switch_feed(feed);
    }

    fn save_to_album(&mut self, album: &str, index: usize) {
        let Some(image) = self.state.images().get(index).cloned() else {
            return;
        };
        let (level, text) = match self.library.save_to_album(album, &image) {
            Ok(true) => (MessageLevel::Success, format!("Saved #{} to {album}", image.id)),
            Ok(false) => (MessageLevel::Info, format!("#{} is already in {album}", image.id)),
            Err(e) => (MessageLevel::Error, e.to_string()),
        };
        self.state.push_message(level, text);
    }

    fn toggle_favorite(&mut self, index: usize) {
        let Some(image) = self.state.images().get(index).cloned() else {
            return;
        };
        let (level, text) = match self.library.toggle_favorite(&image) {
            Ok(true) => (MessageLevel::Success, format!("Added #{} to favorites", image.id)),
            Ok(false) => (MessageLevel::Info, format!("Removed #{} from favorites", image.id)),
            Err(e) => (MessageLevel::Error, e.to_string()),
        };
        self.state.push_message(level, text);
    }

    fn open_download(&mut self, index: usize) {
        let Some(url) = self.state.images().get(index).map(|i| i.download_url()) else {
            return;
        };
        match open::that(&url) {
            Ok(()) => self.state.push_message(MessageLevel::Info, format!("Opened {url}")),
            Err(e) => {
                warn!(error = %e, %url, "failed to open image");
                self.state
                    .push_message(MessageLevel::Error, format!("Could not open {url}: {e}"));
            }
        }
    }
}

/// Feed summary for the status bar
fn summary(state: &GalleryState) -> String {
    let controller = &state.controller;
    let progress = match controller.phase() {
        FeedPhase::Loading(ticket) => format!("loading page {}", ticket.page()),
        FeedPhase::Exhausted => "end".to_string(),
        FeedPhase::Idle if controller.last_error().is_some() => "paused".to_string(),
        FeedPhase::Idle => format!("page {}", controller.next_page().saturating_sub(1)),
    };
    format!(
        "{} · {} · {} images · {}",
        controller.feed().label(),
        state.orientation(),
        controller.len(),
        progress
    )
}

/// Draw one frame and record hit areas back into the state
fn render(frame: &mut Frame, state: &mut GalleryState, theme: &Theme) {
    let screen = frame.area();
    let [search_area, grid_area, status_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(screen);

    let label = state.controller.feed().label();
    frame.render_widget(
        SearchBar::new(&state.query, &label, theme).focused(state.mode == Mode::Search),
        search_area,
    );

    render_grid(frame, state, theme, grid_area);

    let modal = state.modal_state();
    if let ModalState::Open { index, .. } = modal {
        let (modal_area, image_region) = modal_layout(screen);
        let (width, height) = {
            let image = &state.images()[index];
            (image.width, image.height)
        };
        state.modal_area = Some(modal_area);
        state.image_area = Some(fit_image(image_region, width, height));

        let location = state.navigator.location().display_path();
        let image = &state.images()[index];
        let widget = ImageModal::new(image, index, state.images().len(), theme)
            .location(&location)
            .actions(state.navigator.actions(state.images()))
            .zoom(state.zoom())
            .favorite(state.modal_favorite);
        frame.render_widget(widget, screen);
    }

    if state.mode == Mode::Search {
        let suggestions = state.suggestions();
        if !suggestions.is_empty() {
            let area = SuggestionList::area_below(search_area, suggestions.len(), screen);
            frame.render_widget(
                SuggestionList::new(&suggestions, state.menu.focused(), theme),
                area,
            );
        }
    }

    if let Some(prompt) = state.album_prompt.as_ref()
        && let Some(image) = state.images().get(prompt.index)
    {
        frame.render_widget(AlbumPromptBox::new(prompt, image.id, theme), screen);
    }

    let summary = summary(state);
    frame.render_widget(StatusBar::new(state.latest_message(), &summary, theme), status_area);

    let hints = match state.mode {
        Mode::Search => HelpBar::search_hints(),
        Mode::AlbumPrompt => HelpBar::prompt_hints(),
        Mode::Browse if modal.is_open() => HelpBar::modal_hints(state.navigator.actions(state.images())),
        Mode::Browse => HelpBar::grid_hints(),
    };
    frame.render_widget(HelpBar::new(&hints, theme), help_area);
}

fn render_grid(frame: &mut Frame, state: &mut GalleryState, theme: &Theme, area: Rect) {
    state.set_viewport(area.width, area.height);
    let assignment = state.assignment();
    state.card_areas = card_rects(area, &assignment, state.scroll_row, state.card_height);

    if state.images().is_empty() {
        let text = if state.controller.is_loading() {
            "Loading…".to_string()
        } else if let Some(error) = state.controller.last_error() {
            format!("Could not load images: {error}")
        } else {
            "No images".to_string()
        };
        let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1.min(area.height));
        frame.render_widget(
            Paragraph::new(text)
                .style(theme.dimmed_style())
                .alignment(Alignment::Center),
            middle,
        );
        return;
    }

    let buf = frame.buffer_mut();
    for (rect, index) in &state.card_areas {
        let image = &state.images()[*index];
        ImageCard::new(image, theme)
            .selected(*index == state.cursor)
            .render(*rect, buf);
    }
}
