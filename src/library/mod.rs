//! Local albums and favorites
//!
//! A single-user store for images the user wants to keep, backed by sled.
//!
//! Trees:
//! - `images`: image id -> `StoredImage`
//! - `albums`: `album\0seq` -> image id (page order)
//! - `album_members`: `album\0id` -> seq (membership lookups)
//! - `favorites`: seq -> image id (page order)
//! - `favorite_ids`: image id -> seq (membership lookups)
//!
//! Sequence numbers come from sled's monotonic id generator, so iterating a
//! tree backwards yields the most recently saved image first. Album and
//! favorite feeds page through the same scroll controller as remote feeds.

use crate::api::{FeedQuery, FetchError, ImagePage, ImageRecord, ImageSource, PER_PAGE, PageRequest};
use sled::{Db, IVec, Tree};
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod error;
pub mod types;

pub use error::LibraryError;
pub use types::{AlbumName, AlbumSummary, StoredImage};

use types::{decode_u64, split_album_key};

/// Local image library
pub struct Library {
    db: Db,
    images: Tree,
    albums: Tree,
    album_members: Tree,
    favorites: Tree,
    favorite_ids: Tree,
}

impl Library {
    /// Opens or creates a library at the specified path
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the database or its trees cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LibraryError> {
        let db = sled::open(path)?;
        Ok(Self {
            images: db.open_tree("images")?,
            albums: db.open_tree("albums")?,
            album_members: db.open_tree("album_members")?,
            favorites: db.open_tree("favorites")?,
            favorite_ids: db.open_tree("favorite_ids")?,
            db,
        })
    }

    /// Default library location: `<data dir>/scatch/library`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("scatch").join("library"))
    }

    /// Add an image to an album, creating the album if needed
    ///
    /// Returns false if the image was already in the album.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` for an invalid album name or a storage failure.
    pub fn save_to_album(&self, album: &str, image: &ImageRecord) -> Result<bool, LibraryError> {
        let name = AlbumName::new(album)?;
        let member_key = name.key(image.id);
        if self.album_members.contains_key(&member_key)? {
            return Ok(false);
        }

        self.store_image(image)?;
        let seq = self.db.generate_id()?;
        self.albums.insert(name.key(seq), image.id.to_be_bytes().to_vec())?;
        self.album_members.insert(member_key, seq.to_be_bytes().to_vec())?;
        debug!(id = image.id, album = name.as_str(), "saved image to album");
        Ok(true)
    }

    /// Remove an image from an album
    ///
    /// Returns false if the image was not in the album.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` for an invalid album name or a storage failure.
    pub fn remove_from_album(&self, album: &str, id: u64) -> Result<bool, LibraryError> {
        let name = AlbumName::new(album)?;
        let Some(seq) = self.album_members.remove(name.key(id))? else {
            return Ok(false);
        };
        let seq = decode_u64(&seq, "album_members")?;
        self.albums.remove(name.key(seq))?;
        self.prune_image(id)?;
        debug!(id, album = name.as_str(), "removed image from album");
        Ok(true)
    }

    /// Every album with its image count, sorted by name
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the album index cannot be read.
    pub fn list_albums(&self) -> Result<Vec<AlbumSummary>, LibraryError> {
        let mut albums: Vec<AlbumSummary> = Vec::new();
        for entry in self.album_members.iter() {
            let (key, _) = entry?;
            let (name, _) = split_album_key(&key, "album_members")?;
            match albums.last_mut() {
                Some(last) if last.name == name => last.count += 1,
                _ => albums.push(AlbumSummary { name, count: 1 }),
            }
        }
        Ok(albums)
    }

    /// Whether an album has any images
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` for an invalid album name or a storage failure.
    pub fn album_exists(&self, album: &str) -> Result<bool, LibraryError> {
        let name = AlbumName::new(album)?;
        Ok(self.albums.scan_prefix(name.prefix()).next().transpose()?.is_some())
    }

    /// One page of an album, newest first
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` for an invalid album name, a zero page or a
    /// storage failure.
    pub fn album_page(&self, album: &str, page: u32) -> Result<ImagePage, LibraryError> {
        let name = AlbumName::new(album)?;
        let ids = self.albums.scan_prefix(name.prefix()).values().rev();
        self.page_of(ids, page, "albums")
    }

    /// Delete an album; returns how many images it held
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the album has no images, or a
    /// storage error.
    pub fn delete_album(&self, album: &str) -> Result<usize, LibraryError> {
        let name = AlbumName::new(album)?;
        let prefix = name.prefix();

        let mut removed = 0;
        for entry in self.albums.scan_prefix(&prefix) {
            let (key, _) = entry?;
            self.albums.remove(key)?;
            removed += 1;
        }
        let mut members = Vec::new();
        for entry in self.album_members.scan_prefix(&prefix) {
            let (key, _) = entry?;
            let (_, id) = split_album_key(&key, "album_members")?;
            self.album_members.remove(key)?;
            members.push(id);
        }
        for id in members {
            self.prune_image(id)?;
        }

        if removed == 0 {
            return Err(LibraryError::NotFound(format!("album '{}'", name.as_str())));
        }
        debug!(album = name.as_str(), removed, "deleted album");
        Ok(removed)
    }

    /// Mark an image as favorite; returns false if it already was
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the store cannot be written.
    pub fn add_favorite(&self, image: &ImageRecord) -> Result<bool, LibraryError> {
        let id = image.id.to_be_bytes();
        if self.favorite_ids.contains_key(id)? {
            return Ok(false);
        }
        self.store_image(image)?;
        let seq = self.db.generate_id()?;
        self.favorites.insert(seq.to_be_bytes(), id.to_vec())?;
        self.favorite_ids.insert(id, seq.to_be_bytes().to_vec())?;
        Ok(true)
    }

    /// Unmark a favorite; returns false if it was not one
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the store cannot be written.
    pub fn remove_favorite(&self, id: u64) -> Result<bool, LibraryError> {
        let Some(seq) = self.favorite_ids.remove(id.to_be_bytes())? else {
            return Ok(false);
        };
        self.favorites.remove(seq)?;
        self.prune_image(id)?;
        Ok(true)
    }

    /// Flip an image's favorite flag; returns the new state
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the store cannot be written.
    pub fn toggle_favorite(&self, image: &ImageRecord) -> Result<bool, LibraryError> {
        if self.remove_favorite(image.id)? {
            debug!(id = image.id, "unfavorited image");
            Ok(false)
        } else {
            self.add_favorite(image)?;
            debug!(id = image.id, "favorited image");
            Ok(true)
        }
    }

    /// # Errors
    ///
    /// Returns `LibraryError` if the favorite index cannot be read.
    pub fn is_favorite(&self, id: u64) -> Result<bool, LibraryError> {
        Ok(self.favorite_ids.contains_key(id.to_be_bytes())?)
    }

    /// One page of favorites, newest first
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` for a zero page or a storage failure.
    pub fn favorites_page(&self, page: u32) -> Result<ImagePage, LibraryError> {
        let ids = self.favorites.iter().values().rev();
        self.page_of(ids, page, "favorites")
    }

    /// Stored image by id
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the record cannot be read or decoded.
    pub fn image(&self, id: u64) -> Result<Option<ImageRecord>, LibraryError> {
        match self.images.get(id.to_be_bytes())? {
            Some(bytes) => {
                let (stored, _): (StoredImage, usize) =
                    bincode::decode_from_slice(&bytes, bincode::config::standard())?;
                Ok(Some(stored.into()))
            }
            None => Ok(None),
        }
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), LibraryError> {
        self.db.flush()?;
        Ok(())
    }

    fn store_image(&self, image: &ImageRecord) -> Result<(), LibraryError> {
        let key = image.id.to_be_bytes();
        if self.images.contains_key(key)? {
            return Ok(());
        }
        let value = bincode::encode_to_vec(StoredImage::from_record(image), bincode::config::standard())?;
        self.images.insert(key, value)?;
        Ok(())
    }

    /// Drop the stored record once no album or favorite refers to `id`
    fn prune_image(&self, id: u64) -> Result<(), LibraryError> {
        if self.favorite_ids.contains_key(id.to_be_bytes())? {
            return Ok(());
        }
        for key in self.album_members.iter().keys() {
            let (_, member) = split_album_key(&key?, "album_members")?;
            if member == id {
                return Ok(());
            }
        }
        self.images.remove(id.to_be_bytes())?;
        debug!(id, "pruned unreferenced image");
        Ok(())
    }

    /// Page `page` (1-based) of an id iterator
    ///
    /// Reads one id past the page to decide `has_more` exactly, so the last
    /// page of a library never triggers an empty follow-up fetch.
    fn page_of<I>(&self, ids: I, page: u32, tree: &'static str) -> Result<ImagePage, LibraryError>
    where
        I: Iterator<Item = sled::Result<IVec>>,
    {
        if page == 0 {
            return Err(LibraryError::InvalidInput("page must be at least 1".to_string()));
        }
        let skip = (page as usize - 1) * PER_PAGE;

        let mut images = Vec::with_capacity(PER_PAGE);
        let mut has_more = false;
        for raw in ids.skip(skip) {
            if images.len() == PER_PAGE {
                has_more = true;
                break;
            }
            let id = decode_u64(&raw?, tree)?;
            let image = self
                .image(id)?
                .ok_or_else(|| LibraryError::NotFound(format!("image {id}")))?;
            images.push(image);
        }

        Ok(ImagePage {
            images,
            has_more,
            next_cursor: page.saturating_add(1),
        })
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        let _ = self.db.flush();
    }
}

impl ImageSource for Library {
    fn fetch_page(&self, request: &PageRequest) -> Result<ImagePage, FetchError> {
        let result = match &request.feed {
            FeedQuery::Album(name) => self.album_page(name, request.page),
            FeedQuery::Favorites => self.favorites_page(request.page),
            other => return Err(FetchError::UnsupportedFeed(other.label())),
        };
        result.map_err(|e| FetchError::Local(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestLibrary, image, images};

    #[test]
    fn test_save_and_page_album() {
        let test = TestLibrary::new();
        let lib = test.library();
        for img in images(1, 3) {
            assert!(lib.save_to_album("trips", &img).unwrap());
        }

        let page = lib.album_page("trips", 1).unwrap();
        let ids: Vec<u64> = page.images.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert!(!page.has_more);
        assert_eq!(page.next_cursor, 2);
    }

    #[test]
    fn test_save_twice_is_noop() {
        let test = TestLibrary::new();
        let lib = test.library();
        assert!(lib.save_to_album("a", &image(5)).unwrap());
        assert!(!lib.save_to_album("a", &image(5)).unwrap());
        assert_eq!(lib.list_albums().unwrap()[0].count, 1);
    }

    #[test]
    fn test_album_paging_has_more_is_exact() {
        let test = TestLibrary::new();
        let lib = test.library();
        for img in images(1, PER_PAGE + 2) {
            lib.save_to_album("big", &img).unwrap();
        }

        let first = lib.album_page("big", 1).unwrap();
        assert_eq!(first.images.len(), PER_PAGE);
        assert!(first.has_more);

        let second = lib.album_page("big", 2).unwrap();
        assert_eq!(second.images.len(), 2);
        assert!(!second.has_more);
    }

    #[test]
    fn test_full_last_page_reports_no_more() {
        let test = TestLibrary::new();
        let lib = test.library();
        for img in images(1, PER_PAGE) {
            lib.save_to_album("exact", &img).unwrap();
        }
        assert!(!lib.album_page("exact", 1).unwrap().has_more);
    }

    #[test]
    fn test_remove_from_album() {
        let test = TestLibrary::new();
        let lib = test.library();
        lib.save_to_album("a", &image(1)).unwrap();
        lib.save_to_album("a", &image(2)).unwrap();

        assert!(lib.remove_from_album("a", 1).unwrap());
        assert!(!lib.remove_from_album("a", 1).unwrap());
        let ids: Vec<u64> = lib.album_page("a", 1).unwrap().images.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_list_albums_sorted_with_counts() {
        let test = TestLibrary::new();
        let lib = test.library();
        lib.save_to_album("zoo", &image(1)).unwrap();
        lib.save_to_album("art", &image(1)).unwrap();
        lib.save_to_album("art", &image(2)).unwrap();

        let albums = lib.list_albums().unwrap();
        assert_eq!(
            albums,
            vec![
                AlbumSummary { name: "art".to_string(), count: 2 },
                AlbumSummary { name: "zoo".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_delete_album() {
        let test = TestLibrary::new();
        let lib = test.library();
        lib.save_to_album("gone", &image(1)).unwrap();
        lib.save_to_album("gone", &image(2)).unwrap();
        lib.save_to_album("kept", &image(1)).unwrap();

        assert_eq!(lib.delete_album("gone").unwrap(), 2);
        assert!(!lib.album_exists("gone").unwrap());
        assert!(lib.album_exists("kept").unwrap());
        assert!(matches!(lib.delete_album("gone"), Err(LibraryError::NotFound(_))));
    }

    #[test]
    fn test_unreferenced_images_are_pruned() {
        let test = TestLibrary::new();
        let lib = test.library();
        lib.save_to_album("a", &image(1)).unwrap();
        lib.save_to_album("b", &image(1)).unwrap();
        lib.add_favorite(&image(2)).unwrap();
        lib.save_to_album("a", &image(2)).unwrap();
        lib.save_to_album("c", &image(3)).unwrap();

        // still in album b
        lib.remove_from_album("a", 1).unwrap();
        assert!(lib.image(1).unwrap().is_some());
        lib.remove_from_album("b", 1).unwrap();
        assert!(lib.image(1).unwrap().is_none());

        // still a favorite
        lib.delete_album("a").unwrap();
        assert!(lib.image(2).unwrap().is_some());
        lib.remove_favorite(2).unwrap();
        assert!(lib.image(2).unwrap().is_none());

        lib.delete_album("c").unwrap();
        assert!(lib.image(3).unwrap().is_none());
    }

    #[test]
    fn test_toggle_favorite() {
        let test = TestLibrary::new();
        let lib = test.library();
        let img = image(9);

        assert!(lib.toggle_favorite(&img).unwrap());
        assert!(lib.is_favorite(9).unwrap());
        assert!(!lib.toggle_favorite(&img).unwrap());
        assert!(!lib.is_favorite(9).unwrap());
        assert!(lib.favorites_page(1).unwrap().images.is_empty());
    }

    #[test]
    fn test_favorites_newest_first() {
        let test = TestLibrary::new();
        let lib = test.library();
        for img in images(10, 3) {
            lib.add_favorite(&img).unwrap();
        }
        let ids: Vec<u64> = lib.favorites_page(1).unwrap().images.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![12, 11, 10]);
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let test = TestLibrary::new();
        assert!(matches!(
            test.library().favorites_page(0),
            Err(LibraryError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_image_source_routes_feeds() {
        let test = TestLibrary::new();
        let lib = test.library();
        lib.save_to_album("a", &image(1)).unwrap();
        lib.add_favorite(&image(2)).unwrap();

        let album = lib.fetch_page(&PageRequest::new(FeedQuery::Album("a".into()), 1)).unwrap();
        assert_eq!(album.images, vec![image(1)]);

        let favs = lib.fetch_page(&PageRequest::new(FeedQuery::Favorites, 1)).unwrap();
        assert_eq!(favs.images, vec![image(2)]);

        let remote = lib.fetch_page(&PageRequest::new(FeedQuery::curated(), 1));
        assert!(matches!(remote, Err(FetchError::UnsupportedFeed(_))));
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib");
        {
            let lib = Library::open(&path).unwrap();
            lib.save_to_album("keep", &image(4)).unwrap();
            lib.flush().unwrap();
        }
        let lib = Library::open(&path).unwrap();
        assert_eq!(lib.album_page("keep", 1).unwrap().images, vec![image(4)]);
    }
}
