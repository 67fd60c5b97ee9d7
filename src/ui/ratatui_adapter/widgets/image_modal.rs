//! Modal viewer for one image
//!
//! The terminal cannot show the photo itself, so the image is drawn as a
//! block in its placeholder color with the image's aspect ratio. Zoom and
//! pan move and scale that block inside its container.

use crate::api::ImageRecord;
use crate::modal::{ModalActions, ZoomView};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Centered rectangle taking `width`/`height` percent of `area`
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - height.min(90)) / 2),
        Constraint::Percentage(height.min(90)),
        Constraint::Percentage((100 - height.min(90)) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - width.min(90)) / 2),
        Constraint::Percentage(width.min(90)),
        Constraint::Percentage((100 - width.min(90)) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Largest rectangle with the image's aspect ratio, centered in `area`
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_image(area: Rect, width: u32, height: u32) -> Rect {
    if area.is_empty() || width == 0 || height == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    let ratio = width as f32 / height as f32 * CELL_ASPECT;
    let (mut w, mut h) = (f32::from(area.width), f32::from(area.width) / ratio);
    if h > f32::from(area.height) {
        h = f32::from(area.height);
        w = h * ratio;
    }
    let w = (w.round() as u16).clamp(1, area.width);
    let h = (h.round() as u16).clamp(1, area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Where the zoomed image lands, clipped to `container`
///
/// The fitted rectangle is scaled about its centre and shifted by the
/// zoom translation (percent of the scaled size).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn zoomed_rect(fit: Rect, zoom: &ZoomView, container: Rect) -> Rect {
    let scale = zoom.current_scale();
    let (tx, ty) = zoom.translation();
    let w = f32::from(fit.width) * scale;
    let h = f32::from(fit.height) * scale;
    let cx = f32::from(fit.x) + f32::from(fit.width) / 2.0 + tx / 100.0 * w;
    let cy = f32::from(fit.y) + f32::from(fit.height) / 2.0 + ty / 100.0 * h;

    let left = (cx - w / 2.0).max(f32::from(container.x));
    let top = (cy - h / 2.0).max(f32::from(container.y));
    let right = (cx + w / 2.0).min(f32::from(container.right()));
    let bottom = (cy + h / 2.0).min(f32::from(container.bottom()));
    if right <= left || bottom <= top {
        return Rect::new(container.x, container.y, 0, 0);
    }
    let x = left.round() as u16;
    let y = top.round() as u16;
    Rect::new(
        x,
        y,
        (right.round() as u16).saturating_sub(x),
        (bottom.round() as u16).saturating_sub(y),
    )
}

/// Areas the modal occupies inside `screen`: the frame and the image region
#[must_use]
pub fn modal_layout(screen: Rect) -> (Rect, Rect) {
    let frame = centered_rect(90, 90, screen);
    let inner = Block::default().borders(Borders::ALL).inner(frame);
    let [image, _info] = Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(inner);
    // leave room for the step arrows
    let image = Rect::new(
        image.x + 2,
        image.y,
        image.width.saturating_sub(4),
        image.height,
    );
    (frame, image)
}

/// Modal viewer widget
pub struct ImageModal<'a> {
    image: &'a ImageRecord,
    index: usize,
    total: usize,
    location: &'a str,
    actions: ModalActions,
    zoom: Option<&'a ZoomView>,
    favorite: bool,
    theme: &'a Theme,
}

impl<'a> ImageModal<'a> {
    #[must_use]
    pub const fn new(image: &'a ImageRecord, index: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            image,
            index,
            total,
            location: "",
            actions: ModalActions {
                prev: false,
                next: false,
            },
            zoom: None,
            favorite: false,
            theme,
        }
    }

    /// Location shown in the title
    #[must_use]
    pub const fn location(mut self, location: &'a str) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub const fn actions(mut self, actions: ModalActions) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub const fn zoom(mut self, zoom: Option<&'a ZoomView>) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub const fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    fn info_lines(&self) -> Vec<Line<'a>> {
        let mut first = vec![
            Span::styled(format!("#{}", self.image.id), self.theme.cursor_style()),
            Span::styled(" · ", self.theme.dimmed_style()),
            Span::styled(self.image.photographer.as_str(), self.theme.credit_style()),
            Span::styled(
                format!(" · {}x{}", self.image.width, self.image.height),
                self.theme.dimmed_style(),
            ),
        ];
        if self.favorite {
            first.push(Span::styled("  ♥", self.theme.favorite_style()));
        }

        let zoom = match self.zoom {
            Some(zoom) if zoom.is_zoomed() => format!("zoom {:.2}x", zoom.current_scale()),
            _ => "click to zoom".to_string(),
        };
        let second = Line::from(vec![
            Span::styled(format!("{} / {}", self.index + 1, self.total), self.theme.dimmed_style()),
            Span::styled(format!("  {zoom}"), self.theme.dimmed_style()),
        ]);
        vec![Line::from(first), second]
    }
}

impl Widget for ImageModal<'_> {
    fn render(self, screen: Rect, buf: &mut Buffer) {
        let (frame, image_area) = modal_layout(screen);
        Clear.render(frame, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(format!(" {} ", self.location));
        let inner = block.inner(frame);
        block.render(frame, buf);

        let [region, info] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(inner);

        let fit = fit_image(image_area, self.image.width, self.image.height);
        let painted = match self.zoom {
            Some(zoom) => zoomed_rect(fit, zoom, image_area),
            None => fit,
        };
        buf.set_style(painted, Theme::placeholder_style(self.image.placeholder_rgb()));

        if region.height > 0 && region.width > 2 {
            let middle = region.y + region.height / 2;
            let arrow_style = |enabled: bool| {
                if enabled {
                    self.theme.cursor_style()
                } else {
                    self.theme.dimmed_style()
                }
            };
            buf.set_string(region.x, middle, "‹", arrow_style(self.actions.prev));
            buf.set_string(region.right() - 1, middle, "›", arrow_style(self.actions.next));
        }

        Paragraph::new(self.info_lines())
            .alignment(Alignment::Center)
            .render(info, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::image;
    use ratatui::style::Color;

    #[test]
    fn test_fit_landscape_fills_width() {
        // 3:2 image in cells is 3:1
        let fit = fit_image(Rect::new(0, 0, 60, 40), 6000, 4000);
        assert_eq!(fit, Rect::new(0, 10, 60, 20));
    }

    #[test]
    fn test_fit_portrait_fills_height() {
        let fit = fit_image(Rect::new(0, 0, 60, 20), 4000, 6000);
        assert_eq!(fit.height, 20);
        assert_eq!(fit.width, 27);
        assert_eq!(fit.x, 16);
    }

    #[test]
    fn test_fit_degenerate() {
        assert_eq!(fit_image(Rect::new(3, 4, 0, 10), 10, 10).width, 0);
        assert_eq!(fit_image(Rect::new(3, 4, 10, 10), 10, 0).height, 0);
    }

    #[test]
    fn test_unzoomed_rect_is_fit() {
        let fit = Rect::new(10, 5, 40, 20);
        let zoom = ZoomView::new(6000, 4000);
        assert_eq!(zoomed_rect(fit, &zoom, Rect::new(0, 0, 80, 40)), fit);
    }

    #[test]
    fn test_zoomed_rect_is_clipped_to_container() {
        let container = Rect::new(0, 0, 40, 20);
        let fit = Rect::new(0, 0, 40, 20);
        let mut zoom = ZoomView::new(6000, 4000);
        zoom.toggle();
        assert_eq!(zoomed_rect(fit, &zoom, container), container);
    }

    #[test]
    fn test_modal_renders_swatch_and_info() {
        let theme = Theme::default();
        let img = image(4);
        let screen = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(screen);
        ImageModal::new(&img, 3, 10, &theme)
            .location("/image/4")
            .actions(ModalActions {
                prev: true,
                next: true,
            })
            .favorite(true)
            .render(screen, &mut buf);

        let (_, image_area) = modal_layout(screen);
        let fit = fit_image(image_area, img.width, img.height);
        let (r, g, b) = img.placeholder_rgb();
        let centre = (fit.x + fit.width / 2, fit.y + fit.height / 2);
        assert_eq!(buf[centre].bg, Color::Rgb(r, g, b));

        let all: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(all.contains("/image/4"));
        assert!(all.contains("Photographer 4"));
        assert!(all.contains("4 / 10"));
        assert!(all.contains('♥'));
    }
}
