//! Help bar widget for displaying keybind hints

use crate::modal::ModalActions;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// Key combination (e.g., "←", "/")
    pub key: String,
    /// Action description (e.g., "prev", "search")
    pub action: String,
    /// Disabled hints are drawn dimmed
    pub enabled: bool,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
            enabled: true,
        }
    }

    /// Mark the hint enabled or disabled
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints for the grid
    #[must_use]
    pub fn grid_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("arrows", "move"),
            KeyHint::new("Enter", "open"),
            KeyHint::new("/", "search"),
            KeyHint::new("TAB", "orientation"),
            KeyHint::new("s", "save"),
            KeyHint::new("f", "favorite"),
            KeyHint::new("q", "quit"),
        ]
    }

    /// Hints for the open modal; step hints follow the enabled actions
    #[must_use]
    pub fn modal_hints(actions: ModalActions) -> Vec<KeyHint> {
        vec![
            KeyHint::new("←", "prev").enabled(actions.prev),
            KeyHint::new("→", "next").enabled(actions.next),
            KeyHint::new("click", "zoom"),
            KeyHint::new("s", "save"),
            KeyHint::new("f", "favorite"),
            KeyHint::new("o", "open"),
            KeyHint::new("ESC", "close"),
        ]
    }

    /// Hints while typing a search
    #[must_use]
    pub fn search_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("↑↓", "history"),
            KeyHint::new("Enter", "search"),
            KeyHint::new("ESC", "cancel"),
        ]
    }

    /// Hints while typing an album name
    #[must_use]
    pub fn prompt_hints() -> Vec<KeyHint> {
        vec![KeyHint::new("Enter", "save"), KeyHint::new("ESC", "cancel")]
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            let (key_style, action_style) = if hint.enabled {
                (self.theme.cursor_style(), self.theme.normal_style())
            } else {
                (self.theme.dimmed_style(), self.theme.dimmed_style())
            };
            spans.push(Span::styled(hint.key.as_str(), key_style));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::styled(hint.action.as_str(), action_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
