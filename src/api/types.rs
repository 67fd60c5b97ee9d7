//! Image records, pages and request descriptors

use super::error::FetchError;
use crate::modal::route_path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed number of images requested per page
pub const PER_PAGE: usize = 24;

/// Placeholder color used when an image carries no usable average color
const FALLBACK_RGB: (u8, u8, u8) = (0x73, 0x73, 0x73);

/// One image as returned by the remote API
///
/// Immutable once fetched; owned by whichever feed fetched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Identifier, unique per source
    pub id: u64,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Dominant average color (`#RRGGBB`), shown while the image loads
    pub avg_color: String,
    /// Photographer display name
    pub photographer: String,
    /// Source URL the size variants are derived from
    pub src: String,
}

impl ImageRecord {
    /// Portrait images are taller than they are wide
    #[must_use]
    pub const fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Width divided by height (1.0 for degenerate heights)
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }

    /// Compressed variant used in the grid
    #[must_use]
    pub fn grid_url(&self) -> String {
        format!("{}?auto=compress&cs=tinysrgb&w=940", self.src)
    }

    /// Full-size download link
    #[must_use]
    pub fn download_url(&self) -> String {
        format!("{}?cs=srgb&dl=scatch-{}.jpg&fm=jpg", self.src, self.id)
    }

    /// Average color as RGB, falling back to neutral grey when malformed
    #[must_use]
    pub fn placeholder_rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.avg_color).unwrap_or(FALLBACK_RGB)
    }
}

/// Parse `#RRGGBB` (leading `#` optional)
fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImagePage {
    /// Images in upstream order
    pub images: Vec<ImageRecord>,
    /// Whether another page is believed to exist
    pub has_more: bool,
    /// Page number the next request should use
    pub next_cursor: u32,
}

impl ImagePage {
    /// Build a page fetched with cursor `page`, applying the full-page heuristic
    #[must_use]
    pub fn from_images(images: Vec<ImageRecord>, page: u32) -> Self {
        let has_more = images.len() == PER_PAGE;
        Self {
            images,
            has_more,
            next_cursor: page.saturating_add(1),
        }
    }
}

/// Orientation filter accepted by the search endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// No filter (never sent upstream)
    #[default]
    All,
    /// Wider than tall
    Landscape,
    /// Taller than wide
    Portrait,
    /// Roughly square
    Square,
}

impl Orientation {
    /// Every accepted value, in menu order
    pub const ALL: [Self; 4] = [Self::All, Self::Landscape, Self::Portrait, Self::Square];

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Square => "square",
        }
    }

    /// Value to send upstream, `None` for `All`
    #[must_use]
    pub const fn as_filter(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            "square" => Ok(Self::Square),
            _ => Err(FetchError::InvalidOrientation(s.to_string())),
        }
    }
}

/// Remote endpoint addressed by the proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Editor-curated feed
    Curated,
    /// Keyword search
    Search,
    /// One photo by id
    Photo(u64),
}

impl Endpoint {
    /// Path below the API root
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Curated => "/v1/curated".to_string(),
            Self::Search => "/v1/search".to_string(),
            Self::Photo(id) => format!("/v1/photos/{id}"),
        }
    }

    /// Endpoint name as carried in the proxy's `e` parameter
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Curated => "curated".to_string(),
            Self::Search => "search".to_string(),
            Self::Photo(id) => format!("photos/{id}"),
        }
    }
}

impl FromStr for Endpoint {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('/');
        let name = name.strip_prefix("v1/").unwrap_or(name);
        match name {
            "curated" => Ok(Self::Curated),
            "search" => Ok(Self::Search),
            other => other
                .strip_prefix("photos/")
                .and_then(|id| id.parse().ok())
                .map(Self::Photo)
                .ok_or_else(|| FetchError::UnknownEndpoint(s.to_string())),
        }
    }
}

/// A feed the scroll controller can page through
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedQuery {
    /// Curated photos
    Curated {
        /// Orientation filter
        orientation: Orientation,
    },
    /// Keyword search
    Search {
        /// Search text
        query: String,
        /// Orientation filter
        orientation: Orientation,
    },
    /// A local album
    Album(String),
    /// Local favorites
    Favorites,
}

impl FeedQuery {
    /// Search feed with no orientation filter
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self::Search {
            query: query.into(),
            orientation: Orientation::All,
        }
    }

    /// Curated feed with no orientation filter
    #[must_use]
    pub const fn curated() -> Self {
        Self::Curated {
            orientation: Orientation::All,
        }
    }

    /// Whether this feed is served by the remote API
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Curated { .. } | Self::Search { .. })
    }

    /// Short human-readable label
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Curated { orientation: Orientation::All } => "curated".to_string(),
            Self::Curated { orientation } => format!("curated ({orientation})"),
            Self::Search { query, orientation: Orientation::All } => format!("\"{query}\""),
            Self::Search { query, orientation } => format!("\"{query}\" ({orientation})"),
            Self::Album(name) => format!("album {name}"),
            Self::Favorites => "favorites".to_string(),
        }
    }

    /// Location path the gallery shows for this feed, percent-encoded
    #[must_use]
    pub fn route(&self) -> String {
        match self {
            Self::Curated { .. } => route_path(&["search"]),
            Self::Search { query, .. } => route_path(&["search", query.as_str()]),
            Self::Album(name) => route_path(&["dashboard", "albums", name.as_str()]),
            Self::Favorites => route_path(&["dashboard", "favorites"]),
        }
    }
}

/// One page request against a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Feed to page through
    pub feed: FeedQuery,
    /// 1-based page cursor
    pub page: u32,
}

impl PageRequest {
    /// Create a request for `page` of `feed`
    #[must_use]
    pub const fn new(feed: FeedQuery, page: u32) -> Self {
        Self { feed, page }
    }
}
