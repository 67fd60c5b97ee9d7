//! Column layout engine
//!
//! Splits a flat, ordered image list into columns for a given container
//! width. Assignment is a row-major "snake": image `i` goes to column
//! `i % columns`, so reading left-to-right, top-to-bottom follows the
//! original order. Columns are not balanced by image height.
//!
//! ```
//! use scatch::layout::ColumnLayout;
//!
//! let layout = ColumnLayout::new(300);
//! let assignment = layout.assign(1000, 7);
//! assert_eq!(assignment.columns(), &[vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
//! assert_eq!(assignment.rows(), 3);
//! ```

mod cache;

pub use cache::LayoutCache;

/// Minimum column width (pixels) used by the web grid
pub const DEFAULT_MIN_COLUMN_WIDTH: u32 = 300;

/// Computes column counts and assignments for a fixed minimum column width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    min_column_width: u32,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_COLUMN_WIDTH)
    }
}

impl ColumnLayout {
    /// Create a layout; a zero width is treated as 1
    #[must_use]
    pub const fn new(min_column_width: u32) -> Self {
        Self {
            min_column_width: if min_column_width == 0 { 1 } else { min_column_width },
        }
    }

    /// Minimum width of one column
    #[must_use]
    pub const fn min_column_width(&self) -> u32 {
        self.min_column_width
    }

    /// `max(1, floor(container_width / min_column_width))`
    #[must_use]
    pub const fn column_count(&self, container_width: u32) -> usize {
        let count = (container_width / self.min_column_width) as usize;
        if count == 0 { 1 } else { count }
    }

    /// Assign `image_count` images to columns for `container_width`
    #[must_use]
    pub fn assign(&self, container_width: u32, image_count: usize) -> LayoutAssignment {
        LayoutAssignment::snake(self.column_count(container_width), image_count)
    }
}

/// Column index to ordered image indices
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutAssignment {
    columns: Vec<Vec<usize>>,
    rows: usize,
    len: usize,
}

impl LayoutAssignment {
    /// Snake assignment of `len` images over `column_count` columns
    #[must_use]
    pub fn snake(column_count: usize, len: usize) -> Self {
        let column_count = column_count.max(1);
        let rows = len.div_ceil(column_count);

        let columns = (0..column_count)
            .map(|column| (column..len).step_by(column_count).collect())
            .collect();

        Self { columns, rows, len }
    }

    /// Per-column image indices, ascending
    #[must_use]
    pub fn columns(&self) -> &[Vec<usize>] {
        &self.columns
    }

    /// Number of columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Rows per column once padded to a multiple of the column count
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of images laid out
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there is nothing to lay out
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Single-column (mobile) layout: captions and actions sit outside the image
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.columns.len() == 1
    }

    /// `(column, row)` of an image index
    #[must_use]
    pub fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.len).then(|| (index % self.columns.len(), index / self.columns.len()))
    }

    /// Image index at `(column, row)`, if that cell is filled
    #[must_use]
    pub fn index_at(&self, column: usize, row: usize) -> Option<usize> {
        if column >= self.columns.len() {
            return None;
        }
        self.columns[column].get(row).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_column_count() {
        let layout = ColumnLayout::new(300);
        assert_eq!(layout.column_count(0), 1);
        assert_eq!(layout.column_count(299), 1);
        assert_eq!(layout.column_count(300), 1);
        assert_eq!(layout.column_count(600), 2);
        assert_eq!(layout.column_count(1280), 4);
    }

    #[test]
    fn test_zero_min_width_is_clamped() {
        let layout = ColumnLayout::new(0);
        assert_eq!(layout.min_column_width(), 1);
        assert_eq!(layout.column_count(5), 5);
    }

    #[test]
    fn test_columns_follow_modulo_rule() {
        for columns in 1..=6 {
            for len in 0..=30 {
                let assignment = LayoutAssignment::snake(columns, len);
                for (c, indices) in assignment.columns().iter().enumerate() {
                    let expected: Vec<usize> = (0..len).filter(|i| i % columns == c).collect();
                    assert_eq!(indices, &expected, "columns={columns} len={len} column={c}");
                }
            }
        }
    }

    #[test]
    fn test_union_covers_every_index_once() {
        let assignment = ColumnLayout::new(250).assign(1100, 58);
        let mut seen = HashSet::new();
        for indices in assignment.columns() {
            for &i in indices {
                assert!(seen.insert(i), "index {i} assigned twice");
            }
        }
        assert_eq!(seen.len(), 58);
        assert!(seen.iter().all(|&i| i < 58));
    }

    #[test]
    fn test_rows_round_up() {
        assert_eq!(LayoutAssignment::snake(3, 0).rows(), 0);
        assert_eq!(LayoutAssignment::snake(3, 6).rows(), 2);
        assert_eq!(LayoutAssignment::snake(3, 7).rows(), 3);
        assert_eq!(LayoutAssignment::snake(4, 58).rows(), 15);
    }

    #[test]
    fn test_assignment_is_idempotent() {
        let layout = ColumnLayout::new(300);
        assert_eq!(layout.assign(1000, 24), layout.assign(1000, 24));
    }

    #[test]
    fn test_compact_layout() {
        assert!(ColumnLayout::new(300).assign(320, 10).is_compact());
        assert!(!ColumnLayout::new(300).assign(900, 10).is_compact());
    }

    #[test]
    fn test_position_round_trip() {
        let assignment = LayoutAssignment::snake(3, 8);
        assert_eq!(assignment.position_of(7), Some((1, 2)));
        assert_eq!(assignment.index_at(1, 2), Some(7));
        assert_eq!(assignment.index_at(2, 2), None);
        assert_eq!(assignment.index_at(5, 0), None);
        assert_eq!(assignment.position_of(8), None);
    }
}
