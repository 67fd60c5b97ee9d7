//! Memoised layout assignments
//!
//! A resize or a new page only changes the assignment when the column count
//! or the list length changes, so assignments are cached on that pair.

use super::{ColumnLayout, LayoutAssignment};
use moka::sync::Cache;
use std::sync::Arc;

/// Assignment cache keyed by `(columns, len)`
#[derive(Debug)]
pub struct LayoutCache {
    layout: ColumnLayout,
    cache: Cache<(usize, usize), Arc<LayoutAssignment>>,
}

impl LayoutCache {
    /// Create a cache for `layout` holding up to 64 assignments
    #[must_use]
    pub fn new(layout: ColumnLayout) -> Self {
        Self::with_capacity(layout, 64)
    }

    /// Create a cache with a custom capacity
    #[must_use]
    pub fn with_capacity(layout: ColumnLayout, max_capacity: u64) -> Self {
        Self {
            layout,
            cache: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    /// Layout the cache computes with
    #[must_use]
    pub const fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Assignment for a container width and list length
    #[must_use]
    pub fn assign(&self, container_width: u32, image_count: usize) -> Arc<LayoutAssignment> {
        let columns = self.layout.column_count(container_width);
        self.cache.get_with((columns, image_count), || {
            Arc::new(LayoutAssignment::snake(columns, image_count))
        })
    }

    /// Drop every cached assignment
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_inputs_share_assignment() {
        let cache = LayoutCache::new(ColumnLayout::new(300));
        let first = cache.assign(1000, 30);
        let second = cache.assign(1000, 30);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_widths_with_same_column_count_share_assignment() {
        let cache = LayoutCache::new(ColumnLayout::new(300));
        let narrow = cache.assign(900, 10);
        let wide = cache.assign(1150, 10);
        assert!(Arc::ptr_eq(&narrow, &wide));
    }

    #[test]
    fn test_cached_matches_direct_computation() {
        let layout = ColumnLayout::new(200);
        let cache = LayoutCache::new(layout);
        for width in [100, 450, 800, 1999] {
            for len in [0, 1, 23, 24, 58] {
                assert_eq!(*cache.assign(width, len), layout.assign(width, len));
            }
        }
    }

    #[test]
    fn test_clear_recomputes() {
        let cache = LayoutCache::new(ColumnLayout::new(300));
        let before = cache.assign(600, 5);
        cache.clear();
        let after = cache.assign(600, 5);
        assert_eq!(*before, *after);
    }
}
