//! Color theme for the gallery
//!
//! Defines colors and styles used throughout the gallery.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the gallery
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border of the selected card
    pub selection: Color,
    /// Key hints and focused inputs
    pub cursor: Color,
    /// Color for success messages
    pub success: Color,
    /// Color for error messages
    pub error: Color,
    /// Color for warning messages
    pub warning: Color,
    /// Color for info messages
    pub info: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Photographer credit
    pub credit: Color,
    /// Favorite marker
    pub favorite: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection: Color::Cyan,
            cursor: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            credit: Color::Magenta,
            favorite: Color::LightRed,
        }
    }

    /// Border style for the selected card
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for key names and focused inputs
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the focused history suggestion
    #[must_use]
    pub fn focused_suggestion_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for success messages
    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for error messages
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for warning messages
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for info messages
    #[must_use]
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for photographer names
    #[must_use]
    pub fn credit_style(&self) -> Style {
        Style::default().fg(self.credit)
    }

    /// Style for the favorite heart
    #[must_use]
    pub fn favorite_style(&self) -> Style {
        Style::default()
            .fg(self.favorite)
            .add_modifier(Modifier::BOLD)
    }

    /// Solid block in an image's placeholder color
    #[must_use]
    pub fn placeholder_style(rgb: (u8, u8, u8)) -> Style {
        let (r, g, b) = rgb;
        Style::default().bg(Color::Rgb(r, g, b))
    }
}
