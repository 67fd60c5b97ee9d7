//! Testing utilities for scatch
//!
//! This module provides image fixtures, a scripted [`ImageSource`] that
//! replays canned pages, and a `TestLibrary` wrapper for a throwaway
//! on-disk library.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{FetchError, ImagePage, ImageRecord, ImageSource, PageRequest};
use crate::library::Library;
use std::collections::VecDeque;
use std::sync::Mutex;
use tempfile::TempDir;

/// Build an image fixture with a predictable shape
///
/// Even ids are landscape, odd ids are portrait.
#[must_use]
pub fn image(id: u64) -> ImageRecord {
    let (width, height) = if id % 2 == 0 { (6000, 4000) } else { (4000, 6000) };
    ImageRecord {
        id,
        width,
        height,
        avg_color: format!("#{:06X}", (id * 0x0101_01) & 0xFF_FFFF),
        photographer: format!("Photographer {id}"),
        src: format!("https://images.example.com/photos/{id}/photo-{id}.jpeg"),
    }
}

/// `count` consecutive fixtures starting at `first_id`
#[must_use]
pub fn images(first_id: u64, count: usize) -> Vec<ImageRecord> {
    (first_id..first_id + count as u64).map(image).collect()
}

/// A page of `count` fixtures fetched with cursor `page`
#[must_use]
pub fn page_of(count: usize, first_id: u64, page: u32) -> ImagePage {
    ImagePage::from_images(images(first_id, count), page)
}

/// Image source that replays scripted results in order
///
/// Records every request it receives. Once the script runs out it answers
/// with empty pages.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<ImagePage, FetchError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedSource {
    /// Create a source replaying `script`
    #[must_use]
    pub fn new(script: Vec<Result<ImagePage, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    ///
    /// # Panics
    /// Panics if the request log mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    /// Number of requests received so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.requests().len()
    }
}

impl ImageSource for ScriptedSource {
    fn fetch_page(&self, request: &PageRequest) -> Result<ImagePage, FetchError> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());
        self.script
            .lock()
            .expect("script poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(ImagePage::from_images(Vec::new(), request.page)))
    }
}

/// Wrapper for a temporary library that cleans up on drop
pub struct TestLibrary {
    _dir: TempDir,
    library: Library,
}

impl TestLibrary {
    /// Open a library in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or the library cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let library = Library::open(dir.path().join("library")).expect("Failed to open test library");
        Self { _dir: dir, library }
    }

    /// Get a reference to the underlying library
    #[must_use]
    pub const fn library(&self) -> &Library {
        &self.library
    }
}

impl Default for TestLibrary {
    fn default() -> Self {
        Self::new()
    }
}
