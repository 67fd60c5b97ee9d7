//! Terminal gallery
//!
//! A full-screen ratatui front end over the feed, layout, modal and history
//! modules. All decisions (which page to fetch, where an image sits, whether
//! the modal is open) live in those modules; this layer draws them and
//! turns terminal events into calls on them.

pub mod error;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use ratatui_adapter::{GalleryApp, GalleryState, Mode, Theme};
