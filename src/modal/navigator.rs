//! Modal reducer and navigator
//!
//! [`modal_state`] is a pure function of the loaded images and the current
//! location. [`ModalNavigator`] only ever writes history entries; whatever
//! it displays is read back through the reducer.

use super::history::NavigationHistory;
use super::location::{Location, ModalParams};
use crate::api::ImageRecord;
use tracing::debug;

/// What the modal shows for a given location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    /// No modal, or the location's parameters do not match the images
    Closed,
    /// Modal showing one image
    Open {
        /// Flat index of the image in the loaded list
        index: usize,
        /// Id of the image at `index`
        id: u64,
        /// Whether an image precedes this one
        has_prev: bool,
        /// Whether an image follows this one
        has_next: bool,
    },
}

impl ModalState {
    /// Whether a modal is showing
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Index of the open image
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Open { index, .. } => Some(*index),
            Self::Closed => None,
        }
    }
}

/// Which step buttons are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalActions {
    /// Previous-image step is available
    pub prev: bool,
    /// Next-image step is available
    pub next: bool,
}

/// Derive the modal state from `(images, location)`
///
/// The modal is open only when the location carries modal parameters, the
/// index is inside the loaded list and the image at that index has the
/// encoded id. Anything else reads as closed.
#[must_use]
pub fn modal_state(images: &[ImageRecord], location: &Location) -> ModalState {
    let Some(ModalParams { id, index }) = location.modal() else {
        return ModalState::Closed;
    };
    match images.get(index) {
        Some(image) if image.id == id => ModalState::Open {
            index,
            id,
            has_prev: index > 0,
            has_next: index + 1 < images.len(),
        },
        _ => ModalState::Closed,
    }
}

/// Opens, steps and closes the modal by editing navigation history
#[derive(Debug, Clone)]
pub struct ModalNavigator<H> {
    history: H,
}

impl<H: NavigationHistory> ModalNavigator<H> {
    pub const fn new(history: H) -> Self {
        Self { history }
    }

    /// Underlying history
    pub const fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access, for host-driven back/forward
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Current location
    pub fn location(&self) -> &Location {
        self.history.current()
    }

    /// Modal state for the current location
    pub fn state(&self, images: &[ImageRecord]) -> ModalState {
        modal_state(images, self.history.current())
    }

    /// Enabled step actions for the current location
    pub fn actions(&self, images: &[ImageRecord]) -> ModalActions {
        match self.state(images) {
            ModalState::Open {
                has_prev, has_next, ..
            } => ModalActions {
                prev: has_prev,
                next: has_next,
            },
            ModalState::Closed => ModalActions::default(),
        }
    }

    /// Open the image at `index`
    ///
    /// Pushes a history entry when no modal is open. If one is already open
    /// the entry is replaced, so back still returns to the grid. Returns
    /// false (and leaves history untouched) for an out-of-range index.
    pub fn open(&mut self, images: &[ImageRecord], index: usize) -> bool {
        let Some(image) = images.get(index) else {
            return false;
        };
        let params = ModalParams { id: image.id, index };
        let target = self.history.current().clone().with_modal(params);
        debug!(location = %target, "opening modal");
        if self.state(images).is_open() {
            self.history.replace(target);
        } else {
            self.history.push(target);
        }
        true
    }

    /// Step to the next image
    pub fn next(&mut self, images: &[ImageRecord]) -> bool {
        match self.state(images) {
            ModalState::Open {
                index,
                has_next: true,
                ..
            } => self.step_to(images, index + 1),
            _ => false,
        }
    }

    /// Step to the previous image
    pub fn prev(&mut self, images: &[ImageRecord]) -> bool {
        match self.state(images) {
            ModalState::Open {
                index,
                has_prev: true,
                ..
            } => self.step_to(images, index - 1),
            _ => false,
        }
    }

    /// Close the modal
    ///
    /// Goes back when the previous entry is the location the modal was
    /// opened from. A deep-linked modal has no such entry, so its entry is
    /// replaced with the modal-free location instead.
    pub fn close(&mut self) -> bool {
        let current = self.history.current();
        if current.modal().is_none() {
            return false;
        }
        let base = current.clone().without_modal();
        if self.history.previous() == Some(&base) {
            self.history.back();
        } else {
            self.history.replace(base);
        }
        true
    }

    fn step_to(&mut self, images: &[ImageRecord], index: usize) -> bool {
        let Some(image) = images.get(index) else {
            return false;
        };
        let params = ModalParams { id: image.id, index };
        let target = self.history.current().clone().with_modal(params);
        self.history.replace(target);
        true
    }
}
