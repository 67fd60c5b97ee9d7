//! Scatch - stock photo search with an infinite-scroll column gallery
//!
//! This library provides the pieces behind the `scatch` binary: a paginated
//! fetcher for the remote image API (and the proxy that holds its secret key),
//! an infinite-scroll controller, a column layout engine, a modal navigator
//! whose open image is derived from navigation history, a bounded search
//! history, and a local library of albums and favorites.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod feed;
pub mod history;
pub mod layout;
pub mod library;
pub mod modal;
pub mod output;
pub mod ui;

#[cfg(test)]
pub mod testing;

pub use api::{ImagePage, ImageRecord, Orientation, PER_PAGE};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ScatchError {
    /// Image API error
    #[error("Fetch error: {0}")]
    FetchError(#[from] api::FetchError),
    /// Feed error
    #[error("Feed error: {0}")]
    FeedError(#[from] feed::FeedError),
    /// Search history error
    #[error("History error: {0}")]
    HistoryError(#[from] history::HistoryError),
    /// Library (albums/favorites) error
    #[error("Library error: {0}")]
    LibraryError(#[from] library::LibraryError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
