//! Column grid of image cards

use crate::api::ImageRecord;
use crate::layout::LayoutAssignment;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Screen rectangles for the cards visible from `scroll_row` down
///
/// Columns split the area evenly. A card cut off by the bottom edge is
/// clipped rather than skipped so the next page trigger sees it.
#[must_use]
pub fn card_rects(
    area: Rect,
    assignment: &LayoutAssignment,
    scroll_row: usize,
    card_height: u16,
) -> Vec<(Rect, usize)> {
    let columns = assignment.column_count();
    if columns == 0 || card_height == 0 || area.is_empty() {
        return Vec::new();
    }
    let count = u32::try_from(columns).unwrap_or(1);
    let column_areas =
        Layout::horizontal((0..columns).map(|_| Constraint::Ratio(1, count))).split(area);

    let mut rects = Vec::new();
    for (column, column_area) in column_areas.iter().enumerate() {
        let mut y = area.y;
        let mut row = scroll_row;
        while y < area.bottom() {
            let Some(index) = assignment.index_at(column, row) else {
                break;
            };
            let height = card_height.min(area.bottom() - y);
            rects.push((Rect::new(column_area.x, y, column_area.width, height), index));
            y = y.saturating_add(card_height);
            row += 1;
        }
    }
    rects.sort_by_key(|(_, index)| *index);
    rects
}

/// One image card: placeholder swatch and credit line
pub struct ImageCard<'a> {
    image: &'a ImageRecord,
    selected: bool,
    theme: &'a Theme,
}

impl<'a> ImageCard<'a> {
    #[must_use]
    pub const fn new(image: &'a ImageRecord, theme: &'a Theme) -> Self {
        Self {
            image,
            selected: false,
            theme,
        }
    }

    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for ImageCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            self.theme.selected_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" #{} ", self.image.id));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let [swatch, credit] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        buf.set_style(swatch, Theme::placeholder_style(self.image.placeholder_rgb()));

        let line = Line::from(vec![
            Span::styled(self.image.photographer.as_str(), self.theme.credit_style()),
            Span::styled(
                format!(" {}x{}", self.image.width, self.image.height),
                self.theme.dimmed_style(),
            ),
        ]);
        Paragraph::new(line).render(credit, buf);
    }
}
