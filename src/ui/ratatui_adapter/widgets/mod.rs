//! Ratatui widgets for the gallery
//!
//! Custom widgets for rendering the gallery screen.

mod album_prompt;
mod grid;
mod help_bar;
mod image_modal;
mod search_bar;
mod status_bar;

pub use album_prompt::AlbumPromptBox;
pub use grid::{ImageCard, card_rects};
pub use help_bar::{HelpBar, KeyHint};
pub use image_modal::{ImageModal, centered_rect, fit_image, modal_layout, zoomed_rect};
pub use search_bar::{SearchBar, SuggestionList};
pub use status_bar::StatusBar;
