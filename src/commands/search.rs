//! Search and curated commands - print pages of results

use crate::{
    ScatchError,
    api::{FeedQuery, ImageSource},
    config::ScatchConfig,
    feed::Feed,
    history::HistoryStore,
    output,
};
use tracing::warn;

type Result<T> = std::result::Result<T, ScatchError>;

/// Execute the search (or curated) command
///
/// Fetches up to `pages` pages and prints every image. Successful searches
/// are recorded in the search history.
///
/// # Errors
/// Returns an error if the API is not configured or a page fails.
pub fn execute(config: &ScatchConfig, feed: FeedQuery, pages: u32, quiet: bool) -> Result<()> {
    let source = super::remote_source(config)?;
    let history = super::history_store(config)?;
    run(&source, Some(&history), feed, pages, config.scroll_threshold, quiet)
}

/// Page through `feed` on any source and print the results
///
/// # Errors
/// Returns an error if a page fails or `pages` is zero.
pub fn run<S: ImageSource>(
    source: S,
    history: Option<&HistoryStore>,
    feed: FeedQuery,
    pages: u32,
    threshold: u32,
    quiet: bool,
) -> Result<()> {
    if pages == 0 {
        return Err(ScatchError::InvalidInput("--pages must be at least 1".into()));
    }

    let label = feed.label();
    let query = match &feed {
        FeedQuery::Search { query, .. } => Some(query.clone()),
        _ => None,
    };

    let mut feed = Feed::new(source, feed, threshold);
    feed.load_pages(pages)?;

    if let (Some(store), Some(query)) = (history, query.as_deref()) {
        if let Err(e) = store.record(query) {
            warn!(error = %e, "could not record search history");
        }
    }

    let images = feed.images();
    if images.is_empty() {
        if !quiet {
            println!("No images found for {label}.");
        }
        return Ok(());
    }

    if !quiet {
        println!("{} image(s) for {label}:", images.len());
    }
    for (index, image) in images.iter().enumerate() {
        println!("{}", output::indexed_image_line(index, image, quiet));
    }
    if !quiet && !feed.is_exhausted() {
        println!("More results available (use --pages to fetch more).");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PER_PAGE;
    use crate::testing::{ScriptedSource, page_of};

    #[test]
    fn test_run_records_search_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        let source = ScriptedSource::new(vec![Ok(page_of(3, 1, 1))]);

        run(&source, Some(&store), FeedQuery::search("owls"), 2, 0, true).unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(store.load().unwrap().entries(), ["owls"]);
    }

    #[test]
    fn test_run_stops_after_requested_pages() {
        let source = ScriptedSource::new(vec![
            Ok(page_of(PER_PAGE, 1, 1)),
            Ok(page_of(PER_PAGE, 25, 2)),
            Ok(page_of(PER_PAGE, 49, 3)),
        ]);
        run(&source, None, FeedQuery::curated(), 2, 0, true).unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_failed_search_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        let source = ScriptedSource::new(vec![Err(crate::api::FetchError::MissingQuery)]);

        assert!(run(&source, Some(&store), FeedQuery::search("x"), 1, 0, true).is_err());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_zero_pages_rejected() {
        let source = ScriptedSource::new(Vec::new());
        assert!(run(&source, None, FeedQuery::curated(), 0, 0, true).is_err());
    }
}
