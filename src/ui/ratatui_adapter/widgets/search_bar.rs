//! Search bar widget and its history dropdown

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget},
};

/// Search bar widget that displays the query with cursor
pub struct SearchBar<'a> {
    query: &'a str,
    /// Feed label shown in the border
    label: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, label: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            label,
            theme,
            focused: false,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Search · {} ", self.label));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled(">", self.theme.dimmed_style()), Span::raw(" ")];
        if self.query.is_empty() && !self.focused {
            spans.push(Span::styled("press / to search", self.theme.dimmed_style()));
        } else {
            spans.push(Span::raw(self.query));
        }
        if self.focused {
            spans.push(Span::styled(
                "│",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

/// Dropdown of recent searches under the search bar
pub struct SuggestionList<'a> {
    entries: &'a [&'a str],
    focused: Option<usize>,
    theme: &'a Theme,
}

impl<'a> SuggestionList<'a> {
    #[must_use]
    pub const fn new(entries: &'a [&'a str], focused: Option<usize>, theme: &'a Theme) -> Self {
        Self {
            entries,
            focused,
            theme,
        }
    }

    /// Area the dropdown needs directly below `anchor`
    #[must_use]
    pub fn area_below(anchor: Rect, entries: usize, bounds: Rect) -> Rect {
        let height = u16::try_from(entries + 2).unwrap_or(u16::MAX);
        let y = anchor.bottom().saturating_sub(1);
        let available = bounds.bottom().saturating_sub(y);
        Rect::new(anchor.x + 2, y, anchor.width.saturating_sub(4), height.min(available))
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if Some(i) == self.focused {
                    self.theme.focused_suggestion_style()
                } else {
                    self.theme.normal_style()
                };
                ListItem::new(Line::from(Span::styled(format!(" {entry}"), style)))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Recent ");
        List::new(items).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_placeholder_when_unfocused_and_empty() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        SearchBar::new("", "curated", &theme).render(area, &mut buf);
        assert!(row(&buf, 0).contains("Search · curated"));
        assert!(row(&buf, 1).contains("> press / to search"));
    }

    #[test]
    fn test_focused_shows_query() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        SearchBar::new("tide pools", "\"tide\"", &theme)
            .focused(true)
            .render(area, &mut buf);
        assert!(row(&buf, 1).contains("> tide pools│"));
    }

    #[test]
    fn test_dropdown_area_is_clamped() {
        let anchor = Rect::new(0, 0, 40, 3);
        let bounds = Rect::new(0, 0, 40, 6);
        let area = SuggestionList::area_below(anchor, 5, bounds);
        assert_eq!(area, Rect::new(2, 2, 36, 4));
    }

    #[test]
    fn test_dropdown_lists_entries() {
        let theme = Theme::default();
        let entries = ["fog", "forest"];
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        SuggestionList::new(&entries, Some(1), &theme).render(area, &mut buf);
        assert!(row(&buf, 1).contains("fog"));
        assert!(row(&buf, 2).contains("forest"));
    }
}
