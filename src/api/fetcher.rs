//! Pagination fetcher
//!
//! Turns a [`PageRequest`] into one proxied API call and decodes the
//! response into an [`ImagePage`]. No retries: failures go straight back to
//! the caller.

use super::error::FetchError;
use super::proxy::{ImageProxy, ProxyQuery};
use super::types::{Endpoint, FeedQuery, ImagePage, ImageRecord, PageRequest};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Something that can serve pages of images
///
/// Every feed fetches through this seam: remote feeds through the proxy,
/// albums and favorites through the local library, tests through stubs.
pub trait ImageSource: Send + Sync {
    /// Fetch one page
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the page cannot be produced.
    fn fetch_page(&self, request: &PageRequest) -> Result<ImagePage, FetchError>;
}

impl<S: ImageSource + ?Sized> ImageSource for Arc<S> {
    fn fetch_page(&self, request: &PageRequest) -> Result<ImagePage, FetchError> {
        (**self).fetch_page(request)
    }
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn fetch_page(&self, request: &PageRequest) -> Result<ImagePage, FetchError> {
        (**self).fetch_page(request)
    }
}

#[derive(Debug, Deserialize)]
struct WireSource {
    original: String,
}

#[derive(Debug, Deserialize)]
struct WirePhoto {
    id: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    photographer: String,
    #[serde(default)]
    avg_color: Option<String>,
    src: WireSource,
}

#[derive(Debug, Deserialize)]
struct WirePage {
    #[serde(default)]
    photos: Vec<WirePhoto>,
}

impl From<WirePhoto> for ImageRecord {
    fn from(photo: WirePhoto) -> Self {
        Self {
            id: photo.id,
            width: photo.width,
            height: photo.height,
            avg_color: photo.avg_color.unwrap_or_default(),
            photographer: photo.photographer,
            src: photo.src.original,
        }
    }
}

/// Decode a paged API body fetched with cursor `page`
///
/// # Errors
///
/// Returns `FetchError::Decode` if the body does not have the expected shape.
pub fn decode_page(body: Value, page: u32) -> Result<ImagePage, FetchError> {
    let wire: WirePage = serde_json::from_value(body)?;
    let images = wire.photos.into_iter().map(ImageRecord::from).collect();
    Ok(ImagePage::from_images(images, page))
}

/// Decode a single-photo API body
///
/// # Errors
///
/// Returns `FetchError::Decode` if the body does not have the expected shape.
pub fn decode_photo(body: Value) -> Result<ImageRecord, FetchError> {
    let wire: WirePhoto = serde_json::from_value(body)?;
    Ok(wire.into())
}

/// Translate a remote feed request into the proxy's query
///
/// # Errors
///
/// Returns `FetchError::UnsupportedFeed` for local feeds.
pub fn proxy_query(request: &PageRequest) -> Result<ProxyQuery, FetchError> {
    match &request.feed {
        FeedQuery::Curated { orientation } => {
            Ok(ProxyQuery::page(Endpoint::Curated, request.page).with_orientation(*orientation))
        }
        FeedQuery::Search { query, orientation } => Ok(ProxyQuery::page(Endpoint::Search, request.page)
            .with_query(query.clone())
            .with_orientation(*orientation)),
        other => Err(FetchError::UnsupportedFeed(other.label())),
    }
}

/// Fetches remote feeds through the image proxy
#[derive(Debug)]
pub struct ProxyFetcher {
    proxy: ImageProxy,
}

impl ProxyFetcher {
    /// Create a fetcher on top of a proxy
    #[must_use]
    pub const fn new(proxy: ImageProxy) -> Self {
        Self { proxy }
    }

    /// Underlying proxy
    #[must_use]
    pub const fn proxy(&self) -> &ImageProxy {
        &self.proxy
    }

    /// Fetch a single photo by id
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the request fails or the body cannot be decoded.
    pub fn fetch_photo(&self, id: u64) -> Result<ImageRecord, FetchError> {
        let query = ProxyQuery {
            e: Some(Endpoint::Photo(id).name()),
            ..ProxyQuery::default()
        };
        let body = self.proxy.forward(&query)?;
        decode_photo(body)
    }
}

impl ImageSource for ProxyFetcher {
    fn fetch_page(&self, request: &PageRequest) -> Result<ImagePage, FetchError> {
        let query = proxy_query(request)?;
        debug!(feed = %request.feed.label(), page = request.page, "fetching page");

        let body = self.proxy.forward(&query)?;
        let page = decode_page(body, request.page)?;

        info!(
            feed = %request.feed.label(),
            page = request.page,
            count = page.images.len(),
            has_more = page.has_more,
            "page fetched"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Orientation, PER_PAGE};
    use serde_json::json;

    fn photo_json(id: u64) -> Value {
        json!({
            "id": id,
            "width": 4000,
            "height": 6000,
            "url": format!("https://www.example.com/photo/{id}/"),
            "photographer": "Grace",
            "avg_color": "#7E8A99",
            "src": {
                "original": format!("https://images.example.com/photos/{id}/photo-{id}.jpeg"),
                "large": "ignored"
            }
        })
    }

    #[test]
    fn test_decode_full_page() {
        let photos: Vec<Value> = (0..PER_PAGE as u64).map(photo_json).collect();
        let body = json!({ "page": 2, "per_page": 24, "photos": photos });

        let page = decode_page(body, 2).unwrap();
        assert_eq!(page.images.len(), PER_PAGE);
        assert!(page.has_more);
        assert_eq!(page.next_cursor, 3);
        assert_eq!(page.images[5].id, 5);
        assert_eq!(page.images[5].avg_color, "#7E8A99");
        assert!(page.images[5].src.ends_with("photo-5.jpeg"));
    }

    #[test]
    fn test_decode_short_page_has_no_more() {
        let body = json!({ "photos": [photo_json(1), photo_json(2)] });
        let page = decode_page(body, 1).unwrap();
        assert_eq!(page.images.len(), 2);
        assert!(!page.has_more);
    }

    #[test]
    fn test_decode_missing_photos_is_empty_page() {
        let page = decode_page(json!({ "total_results": 0 }), 1).unwrap();
        assert!(page.images.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_decode_null_avg_color() {
        let mut photo = photo_json(9);
        photo["avg_color"] = Value::Null;
        let record = decode_photo(photo).unwrap();
        assert_eq!(record.avg_color, "");
    }

    #[test]
    fn test_decode_malformed_body() {
        let result = decode_page(json!({ "photos": [{ "id": "nope" }] }), 1);
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_proxy_query_for_feeds() {
        let search = PageRequest::new(
            FeedQuery::Search {
                query: "forest".into(),
                orientation: Orientation::Portrait,
            },
            4,
        );
        let query = proxy_query(&search).unwrap();
        assert_eq!(query.e.as_deref(), Some("search"));
        assert_eq!(query.p.as_deref(), Some("4"));
        assert_eq!(query.q.as_deref(), Some("forest"));
        assert_eq!(query.o.as_deref(), Some("portrait"));

        let album = PageRequest::new(FeedQuery::Album("trips".into()), 1);
        assert!(matches!(proxy_query(&album), Err(FetchError::UnsupportedFeed(_))));
    }
}
