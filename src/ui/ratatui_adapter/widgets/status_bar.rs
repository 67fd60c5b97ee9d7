//! Status bar widget for displaying messages and feed progress

use crate::ui::ratatui_adapter::state::{MessageLevel, StatusMessage};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Status bar: latest message on the left, feed summary on the right
pub struct StatusBar<'a> {
    message: Option<&'a StatusMessage>,
    summary: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(message: Option<&'a StatusMessage>, summary: &'a str, theme: &'a Theme) -> Self {
        Self {
            message,
            summary,
            theme,
        }
    }

    /// Get style for a message level
    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Warning => self.theme.warning_style(),
            MessageLevel::Info => self.theme.info_style(),
        }
    }

    /// Get prefix for a message level
    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let summary_width = u16::try_from(self.summary.chars().count() + 1).unwrap_or(u16::MAX);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(summary_width)]).areas(area);

        if let Some(message) = self.message {
            let style = self.style_for_level(message.level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(message.level), style),
                Span::styled(message.text.as_str(), style),
            ]);
            Paragraph::new(line).render(left, buf);
        }

        Paragraph::new(Span::styled(self.summary, self.theme.dimmed_style()))
            .right_aligned()
            .render(right, buf);
    }
}
