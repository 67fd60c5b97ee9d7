//! Click-to-zoom view state for the modal image
//!
//! Zooming scales the image about its centre. While zoomed, moving the
//! pointer pans the image so the point under the pointer drifts toward the
//! centre. The scale is lower for portrait images, which already fill the
//! container height.

/// Scale applied to portrait images
pub const PORTRAIT_SCALE: f32 = 1.1;
/// Scale applied to landscape and square images
pub const LANDSCAPE_SCALE: f32 = 1.65;

/// Container rectangle in any consistent unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    fn centre(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Zoom and pan state for one open image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomView {
    scale: f32,
    zoomed: bool,
    translate: (f32, f32),
}

impl ZoomView {
    /// View for an image with the given pixel size
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scale: Self::scale_for(width, height),
            zoomed: false,
            translate: (0.0, 0.0),
        }
    }

    /// Zoom scale for an image size
    #[must_use]
    pub fn scale_for(width: u32, height: u32) -> f32 {
        if height > width {
            PORTRAIT_SCALE
        } else {
            LANDSCAPE_SCALE
        }
    }

    /// Flip between zoomed and unzoomed; returns the new zoom state
    ///
    /// Unzooming resets the pan offset.
    pub fn toggle(&mut self) -> bool {
        self.zoomed = !self.zoomed;
        if !self.zoomed {
            self.translate = (0.0, 0.0);
        }
        self.zoomed
    }

    /// Update the pan offset for a pointer position
    ///
    /// Ignored while unzoomed. The pointer is clamped to the container, so
    /// the offset never exceeds the overhang created by the scale.
    pub fn pointer_moved(&mut self, pointer: (f32, f32), container: Bounds) {
        if !self.zoomed || container.width <= 0.0 || container.height <= 0.0 {
            return;
        }
        let (cx, cy) = container.centre();
        let px = pointer.0.clamp(container.x, container.x + container.width);
        let py = pointer.1.clamp(container.y, container.y + container.height);
        let overhang = (self.scale - 1.0) * 100.0;
        self.translate = (
            -(px - cx) / container.width * overhang,
            -(py - cy) / container.height * overhang,
        );
    }

    #[must_use]
    pub const fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    /// Scale currently applied (1.0 while unzoomed)
    #[must_use]
    pub const fn current_scale(&self) -> f32 {
        if self.zoomed { self.scale } else { 1.0 }
    }

    /// Pan offset in percent of the image size
    #[must_use]
    pub const fn translation(&self) -> (f32, f32) {
        self.translate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close_to(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_scale_by_orientation() {
        assert!(close_to(ZoomView::scale_for(4000, 6000), 1.1));
        assert!(close_to(ZoomView::scale_for(6000, 4000), 1.65));
        assert!(close_to(ZoomView::scale_for(500, 500), 1.65));
    }

    #[test]
    fn test_toggle_resets_translation() {
        let mut view = ZoomView::new(6000, 4000);
        assert!(view.toggle());
        view.pointer_moved((0.0, 0.0), Bounds::new(0.0, 0.0, 100.0, 100.0));
        assert_ne!(view.translation(), (0.0, 0.0));

        assert!(!view.toggle());
        assert_eq!(view.translation(), (0.0, 0.0));
        assert!(close_to(view.current_scale(), 1.0));
    }

    #[test]
    fn test_pointer_ignored_when_unzoomed() {
        let mut view = ZoomView::new(6000, 4000);
        view.pointer_moved((10.0, 10.0), Bounds::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(view.translation(), (0.0, 0.0));
    }

    #[test]
    fn test_centre_pointer_has_no_offset() {
        let mut view = ZoomView::new(6000, 4000);
        view.toggle();
        view.pointer_moved((50.0, 40.0), Bounds::new(0.0, 0.0, 100.0, 80.0));
        let (tx, ty) = view.translation();
        assert!(close_to(tx, 0.0) && close_to(ty, 0.0));
    }

    #[test]
    fn test_offset_is_proportional_and_clamped() {
        let mut view = ZoomView::new(6000, 4000);
        view.toggle();
        let bounds = Bounds::new(10.0, 10.0, 200.0, 100.0);

        view.pointer_moved((210.0, 10.0), bounds);
        let (tx, ty) = view.translation();
        assert!(close_to(tx, -32.5));
        assert!(close_to(ty, 32.5));

        view.pointer_moved((1000.0, -500.0), bounds);
        assert_eq!(view.translation(), (tx, ty));
    }

    #[test]
    fn test_portrait_offset_is_smaller() {
        let mut view = ZoomView::new(4000, 6000);
        view.toggle();
        view.pointer_moved((0.0, 50.0), Bounds::new(0.0, 0.0, 100.0, 100.0));
        assert!(close_to(view.translation().0, 5.0));
    }
}
