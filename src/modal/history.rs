//! Navigation history
//!
//! The modal never keeps its own "is open" flag; it reads the current
//! history entry. [`NavigationHistory`] is the seam a host implements (a
//! browser's history API, or [`MemoryHistory`] for the terminal gallery and
//! tests).

use super::location::Location;

/// Back/forward navigable history
pub trait NavigationHistory {
    /// Current entry
    fn current(&self) -> &Location;

    /// Entry `back()` would return to
    fn previous(&self) -> Option<&Location>;

    /// Add an entry, discarding any forward entries
    fn push(&mut self, location: Location);

    /// Overwrite the current entry
    fn replace(&mut self, location: Location);

    /// Step back; returns false at the first entry
    fn back(&mut self) -> bool;

    /// Step forward; returns false at the last entry
    fn forward(&mut self) -> bool;
}

/// In-memory history stack with a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    cursor: usize,
}

impl MemoryHistory {
    /// History holding a single entry
    #[must_use]
    pub fn new(start: Location) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    /// Number of entries (including forward entries)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history has at least one entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the current entry
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }
}

impl NavigationHistory for MemoryHistory {
    fn current(&self) -> &Location {
        &self.entries[self.cursor]
    }

    fn previous(&self) -> Option<&Location> {
        self.cursor.checked_sub(1).map(|i| &self.entries[i])
    }

    fn push(&mut self, location: Location) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor += 1;
    }

    fn replace(&mut self, location: Location) {
        self.entries[self.cursor] = location;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_back_forward() {
        let mut history = MemoryHistory::new(Location::new("/a"));
        history.push(Location::new("/b"));
        history.push(Location::new("/c"));
        assert_eq!(history.current().path(), "/c");
        assert_eq!(history.previous().map(Location::path), Some("/b"));

        assert!(history.back());
        assert!(history.back());
        assert!(!history.back());
        assert_eq!(history.current().path(), "/a");

        assert!(history.forward());
        assert_eq!(history.current().path(), "/b");
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = MemoryHistory::new(Location::new("/a"));
        history.push(Location::new("/b"));
        history.back();
        history.push(Location::new("/c"));

        assert_eq!(history.len(), 2);
        assert!(!history.forward());
        assert_eq!(history.current().path(), "/c");
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = MemoryHistory::new(Location::new("/a"));
        history.push(Location::new("/b"));
        history.replace(Location::new("/b2"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().path(), "/b2");
        assert!(history.previous().is_some());
    }
}
