//! Ratatui-based gallery adapter
//!
//! Draws the scatch gallery with ratatui and reads input through crossterm.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               GalleryApp                    │
//! │     (terminal, fetch worker, stores)        │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │GalleryState│ │  Ratatui  │ │ Crossterm │
//! │  (feed,    │ │ (widgets) │ │  (events) │
//! │ layout,    │ └───────────┘ └───────────┘
//! │ modal)     │
//! └────────────┘
//! ```
//!
//! # Features
//!
//! - **Column grid** sized by the layout engine for the terminal width
//! - **Infinite scroll** with pages fetched off the UI thread
//! - **Modal viewer** with prev/next, click-to-zoom and pointer panning
//! - **Search bar** with recent-search suggestions
//! - **Albums and favorites** from inside the gallery

mod events;
mod gallery;
mod state;
mod theme;
pub mod widgets;

pub use events::{Action, handle_event};
pub use gallery::GalleryApp;
pub use state::{AlbumPrompt, GalleryState, MessageLevel, Mode, StatusMessage};
pub use theme::Theme;
