//! Image modal navigation
//!
//! The open modal lives in the navigable location, never in local state:
//! - [`Location`] encodes the open image as `image=<id>&i=<index>`
//! - [`modal_state`] reduces `(images, location)` to a [`ModalState`]
//! - [`ModalNavigator`] pushes, replaces and pops history entries
//! - [`ZoomView`] is the transient click-to-zoom state of the open image

mod history;
mod location;
mod navigator;
mod zoom;

pub use history::{MemoryHistory, NavigationHistory};
pub use location::{Location, ModalParams, route_path};
pub use navigator::{ModalActions, ModalNavigator, ModalState, modal_state};
pub use zoom::{Bounds, LANDSCAPE_SCALE, PORTRAIT_SCALE, ZoomView};
