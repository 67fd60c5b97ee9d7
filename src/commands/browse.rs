//! Browse command - full-screen gallery with infinite scroll

use crate::{
    ScatchError,
    api::FeedQuery,
    config::ScatchConfig,
    feed::FetchWorker,
    ui::{GalleryApp, GalleryState},
};
use tracing::warn;

type Result<T> = std::result::Result<T, ScatchError>;

/// Execute the browse command
///
/// Starts the gallery on `feed`, fetching pages from the configured API on a
/// background worker.
///
/// # Errors
/// Returns an error if the API is not configured, the library cannot be
/// opened, or the terminal cannot be driven.
pub fn execute(config: &ScatchConfig, feed: FeedQuery) -> Result<()> {
    let source = super::remote_source(config)?;
    let library = super::open_library(config)?;
    let store = super::history_store(config)?;

    let history = store.load().unwrap_or_else(|e| {
        warn!(error = %e, "could not load search history");
        crate::history::SearchHistory::new()
    });

    let state = GalleryState::new(feed, &config.ui, history)?;
    let worker = FetchWorker::spawn(source)?;
    GalleryApp::new(state, worker, library, store).run()?;
    Ok(())
}
