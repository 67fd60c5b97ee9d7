//! Album name prompt overlay

use super::image_modal::centered_rect;
use crate::ui::ratatui_adapter::state::AlbumPrompt;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Prompt asking which album to save an image to
pub struct AlbumPromptBox<'a> {
    prompt: &'a AlbumPrompt,
    image_id: u64,
    theme: &'a Theme,
}

impl<'a> AlbumPromptBox<'a> {
    #[must_use]
    pub const fn new(prompt: &'a AlbumPrompt, image_id: u64, theme: &'a Theme) -> Self {
        Self {
            prompt,
            image_id,
            theme,
        }
    }
}

impl Widget for AlbumPromptBox<'_> {
    fn render(self, screen: Rect, buf: &mut Buffer) {
        let outer = centered_rect(50, 30, screen);
        let area = Rect::new(outer.x, outer.y, outer.width, outer.height.max(6).min(screen.height));
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(format!(" Save #{} to album ", self.image_id));
        let inner = block.inner(area);
        block.render(area, buf);

        let [input, existing] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

        let line = Line::from(vec![
            Span::styled("Album: ", self.theme.dimmed_style()),
            Span::raw(self.prompt.input.as_str()),
            Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        Paragraph::new(line).render(input, buf);

        if !self.prompt.existing.is_empty() {
            let names = self.prompt.existing.join(", ");
            Paragraph::new(Line::from(vec![
                Span::styled("Existing: ", self.theme.dimmed_style()),
                Span::styled(names, self.theme.info_style()),
            ]))
            .wrap(Wrap { trim: true })
            .render(existing, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_shows_input_and_albums() {
        let theme = Theme::default();
        let prompt = AlbumPrompt {
            index: 0,
            input: "bir".into(),
            existing: vec!["birds".into(), "trips".into()],
        };
        let screen = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(screen);
        AlbumPromptBox::new(&prompt, 12, &theme).render(screen, &mut buf);

        let all: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(all.contains("Save #12 to album"));
        assert!(all.contains("Album: bir│"));
        assert!(all.contains("birds, trips"));
    }
}
