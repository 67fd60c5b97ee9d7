//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and the loaded configuration.

pub mod album;
pub mod browse;
pub mod completions;
pub mod config;
pub mod favorite;
pub mod history;
pub mod layout;
pub mod proxy;
pub mod search;
pub mod show;

// Re-export execute functions for convenience
pub use album::execute as album;
pub use browse::execute as browse;
pub use completions::execute as completions;
pub use config::execute as config;
pub use favorite::execute as favorite;
pub use history::execute as history;
pub use layout::execute as layout;
pub use proxy::execute as proxy;
pub use search::execute as search;
pub use show::execute as show;

use crate::ScatchError;
use crate::api::{ImageProxy, ProxyFetcher};
use crate::config::ScatchConfig;
use crate::history::HistoryStore;
use crate::library::Library;

type Result<T> = std::result::Result<T, ScatchError>;

/// Proxy-backed fetcher for the configured API
///
/// # Errors
///
/// Returns `ScatchError::InvalidInput` when no API key is configured, or a
/// fetch error for an invalid endpoint.
pub fn remote_source(config: &ScatchConfig) -> Result<ProxyFetcher> {
    if !config.has_api_key() {
        return Err(ScatchError::InvalidInput(
            "No API key configured. Run 'scatch config set api_key=<KEY>' or set SCATCH_API_KEY.".into(),
        ));
    }
    Ok(ProxyFetcher::new(ImageProxy::from_config(config)?))
}

/// Open the configured library
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the store cannot be
/// opened.
pub fn open_library(config: &ScatchConfig) -> Result<Library> {
    Ok(Library::open(config.library_path()?)?)
}

/// History store at the configured location
///
/// # Errors
///
/// Returns an error if the path cannot be resolved.
pub fn history_store(config: &ScatchConfig) -> Result<HistoryStore> {
    Ok(HistoryStore::new(config.history_path()?))
}
