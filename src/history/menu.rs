//! Keyboard focus over the search suggestion list

/// Keys the menu reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Enter,
}

/// Focus state for a list of `len` suggestions
///
/// Nothing is focused until the first Up or Down, which focuses the first
/// entry. Further Up/Down moves stop at the ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionMenu {
    focused: Option<usize>,
    len: usize,
}

impl SuggestionMenu {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { focused: None, len }
    }

    /// Replace the suggestion count, clearing focus if it falls off the end
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.focused.is_some_and(|i| i >= len) {
            self.focused = None;
        }
    }

    #[must_use]
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Apply a key; returns the selected index on Enter
    pub fn handle_key(&mut self, key: MenuKey) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        match key {
            MenuKey::Down => {
                self.focused = Some(match self.focused {
                    None => 0,
                    Some(i) => (i + 1).min(self.len - 1),
                });
                None
            }
            MenuKey::Up => {
                self.focused = Some(self.focused.map_or(0, |i| i.saturating_sub(1)));
                None
            }
            MenuKey::Enter => self.focused,
        }
    }

    /// Pointer entered the entry at `index`
    pub fn hover(&mut self, index: usize) {
        if index < self.len {
            self.focused = Some(index);
        }
    }

    /// Pointer left the list
    pub fn leave(&mut self) {
        self.focused = None;
    }
}
