//! Remote image API: records, pagination fetcher and proxy
//!
//! - [`types`]: image records, pages, orientation filter, feed descriptors
//! - [`fetcher`]: the [`ImageSource`] seam and the proxy-backed fetcher
//! - [`proxy`]: the key-holding proxy that forwards `{e, p, q, o}` upstream

pub mod error;
pub mod fetcher;
pub mod proxy;
pub mod types;

pub use error::FetchError;
pub use fetcher::{ImageSource, ProxyFetcher, decode_page, decode_photo};
pub use proxy::{ImageProxy, ProxyQuery, ProxyResponse, upstream_url};
pub use types::{Endpoint, FeedQuery, ImagePage, ImageRecord, Orientation, PER_PAGE, PageRequest};
