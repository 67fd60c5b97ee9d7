//! Scroll position snapshot

/// Distance from the bottom (in pixels) at which the next page is requested
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 860;

/// Scroll position in host units (pixels in a browser, rows in the terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top
    pub offset: u32,
    /// Height of the visible viewport
    pub viewport: u32,
    /// Total height of the scrollable content
    pub content: u32,
}

impl ScrollMetrics {
    /// Create a snapshot
    #[must_use]
    pub const fn new(offset: u32, viewport: u32, content: u32) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }

    /// Remaining distance below the viewport
    #[must_use]
    pub const fn distance_to_end(&self) -> u32 {
        self.content
            .saturating_sub(self.offset.saturating_add(self.viewport))
    }

    /// Whether the viewport is within `threshold` of the bottom
    #[must_use]
    pub const fn near_end(&self, threshold: u32) -> bool {
        self.distance_to_end() <= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_end_threshold() {
        let far = ScrollMetrics::new(0, 800, 5000);
        assert_eq!(far.distance_to_end(), 4200);
        assert!(!far.near_end(DEFAULT_SCROLL_THRESHOLD));

        let close = ScrollMetrics::new(3400, 800, 5000);
        assert_eq!(close.distance_to_end(), 800);
        assert!(close.near_end(DEFAULT_SCROLL_THRESHOLD));
    }

    #[test]
    fn test_short_content_is_always_near_end() {
        let short = ScrollMetrics::new(0, 800, 300);
        assert_eq!(short.distance_to_end(), 0);
        assert!(short.near_end(0));
    }
}
