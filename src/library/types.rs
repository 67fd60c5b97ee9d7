//! Stored record types and key encoding
//!
//! Keys are raw byte strings so sled's ordering matches the order we page
//! in. Numbers are big-endian; album keys start with the album name and a
//! NUL separator so one album's entries form a contiguous prefix.

use super::error::LibraryError;
use crate::api::ImageRecord;
use bincode::{Decode, Encode};
use chrono::{DateTime, Utc};

/// An image as kept in the library
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct StoredImage {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub avg_color: String,
    pub photographer: String,
    pub src: String,
    /// Unix timestamp (seconds) of the first save
    pub saved_at: i64,
}

impl StoredImage {
    /// Capture `image` now
    #[must_use]
    pub fn from_record(image: &ImageRecord) -> Self {
        Self {
            id: image.id,
            width: image.width,
            height: image.height,
            avg_color: image.avg_color.clone(),
            photographer: image.photographer.clone(),
            src: image.src.clone(),
            saved_at: Utc::now().timestamp(),
        }
    }

    /// When the image was first saved
    #[must_use]
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.saved_at, 0)
    }
}

impl From<StoredImage> for ImageRecord {
    fn from(stored: StoredImage) -> Self {
        Self {
            id: stored.id,
            width: stored.width,
            height: stored.height,
            avg_color: stored.avg_color,
            photographer: stored.photographer,
            src: stored.src,
        }
    }
}

/// Album name and image count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSummary {
    pub name: String,
    pub count: usize,
}

/// Validated album name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumName(String);

impl AlbumName {
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidInput` for blank names or names
    /// containing a NUL byte.
    pub fn new(name: &str) -> Result<Self, LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::InvalidInput("album name is empty".to_string()));
        }
        if name.contains('\0') {
            return Err(LibraryError::InvalidInput(
                "album name contains a NUL byte".to_string(),
            ));
        }
        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `name\0`, the prefix shared by every key of this album
    #[must_use]
    pub fn prefix(&self) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.0.len() + 1);
        key.extend_from_slice(self.0.as_bytes());
        key.push(0);
        key
    }

    /// `name\0` followed by a big-endian number
    #[must_use]
    pub fn key(&self, n: u64) -> Vec<u8> {
        let mut key = self.prefix();
        key.extend_from_slice(&n.to_be_bytes());
        key
    }
}

/// Decode a big-endian u64 from a value
///
/// # Errors
///
/// Returns `LibraryError::CorruptKey` if `bytes` is not 8 bytes long.
pub fn decode_u64(bytes: &[u8], tree: &'static str) -> Result<u64, LibraryError> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| LibraryError::CorruptKey(tree))?;
    Ok(u64::from_be_bytes(raw))
}

/// Split an album key into its name and trailing number
///
/// # Errors
///
/// Returns `LibraryError::CorruptKey` if the key has no separator or a
/// malformed suffix.
pub fn split_album_key(key: &[u8], tree: &'static str) -> Result<(String, u64), LibraryError> {
    let sep = key
        .iter()
        .position(|&b| b == 0)
        .ok_or(LibraryError::CorruptKey(tree))?;
    let name = std::str::from_utf8(&key[..sep]).map_err(|_| LibraryError::CorruptKey(tree))?;
    let n = decode_u64(&key[sep + 1..], tree)?;
    Ok((name.to_string(), n))
}
