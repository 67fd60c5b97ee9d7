//! Navigable locations
//!
//! A location is a path plus query parameters. An open modal is encoded as
//! two parameters: `image` (the image id) and `i` (its flat index in the
//! loaded list). While a modal is open the address shown to the user is
//! `/image/<id>`, which is what [`Location::display_path`] returns.
//!
//! Paths are kept percent-encoded and parameters are form-encoded, so a
//! search for `cats & dogs?` survives a trip through [`Location::to_url`]
//! and [`Location::parse`].

use reqwest::Url;
use std::fmt;

const IMAGE_PARAM: &str = "image";
const INDEX_PARAM: &str = "i";

/// Origin used to borrow `Url`'s encoders; never shown
const ORIGIN: &str = "http://scatch.invalid/";

fn origin() -> Option<Url> {
    Url::parse(ORIGIN).ok()
}

/// Percent-encoded path built from raw segments
///
/// ```
/// use scatch::modal::route_path;
///
/// assert_eq!(route_path(&["search", "a/b c"]), "/search/a%2Fb%20c");
/// ```
#[must_use]
pub fn route_path(segments: &[&str]) -> String {
    let Some(mut url) = origin() else {
        return format!("/{}", segments.join("/"));
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}

fn encode_path(path: &str) -> String {
    match origin() {
        Some(mut url) => {
            url.set_path(path);
            url.path().to_string()
        }
        None => path.to_string(),
    }
}

/// Image addressed by a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalParams {
    /// Image id
    pub id: u64,
    /// Flat index in the currently loaded list
    pub index: usize,
}

/// A navigable location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: String,
    params: Vec<(String, String)>,
}

impl Location {
    /// Location at `path` with no parameters
    ///
    /// Characters that are not allowed in a path are percent-encoded.
    #[must_use]
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            path: encode_path(path.as_ref()),
            params: Vec::new(),
        }
    }

    /// Parse `path?key=value&...`
    ///
    /// Parameters are form-decoded. Pairs without `=` are kept with an empty
    /// value and any fragment is dropped.
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let Some(parsed) = origin().and_then(|base| base.join(url).ok()) else {
            return Self::new(url);
        };
        Self {
            path: parsed.path().to_string(),
            params: parsed.query_pairs().into_owned().collect(),
        }
    }

    /// Percent-encoded path component
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of a parameter
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set (or replace) a parameter
    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if let Some(slot) = self.params.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.params.push((key.to_string(), value));
        }
        self
    }

    /// Remove a parameter
    #[must_use]
    pub fn without_param(mut self, key: &str) -> Self {
        self.params.retain(|(k, _)| k != key);
        self
    }

    /// Modal parameters, when both are present and well-formed
    #[must_use]
    pub fn modal(&self) -> Option<ModalParams> {
        let id = self.param(IMAGE_PARAM)?.parse().ok()?;
        let index = self.param(INDEX_PARAM)?.parse().ok()?;
        Some(ModalParams { id, index })
    }

    /// Same location with a modal open on `params`
    #[must_use]
    pub fn with_modal(self, params: ModalParams) -> Self {
        self.with_param(IMAGE_PARAM, params.id.to_string())
            .with_param(INDEX_PARAM, params.index.to_string())
    }

    /// Same location with any modal closed
    #[must_use]
    pub fn without_modal(self) -> Self {
        self.without_param(IMAGE_PARAM).without_param(INDEX_PARAM)
    }

    /// Address shown to the user
    #[must_use]
    pub fn display_path(&self) -> String {
        match self.modal() {
            Some(params) => format!("/image/{}", params.id),
            None => self.path.clone(),
        }
    }

    /// Full `path?query` form
    #[must_use]
    pub fn to_url(&self) -> String {
        let Some(mut url) = origin() else {
            return self.path.clone();
        };
        url.set_path(&self.path);
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
        }
        match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let location = Location::parse("/search/cats?o=landscape&image=42&i=3");
        assert_eq!(location.path(), "/search/cats");
        assert_eq!(location.param("o"), Some("landscape"));
        assert_eq!(location.modal(), Some(ModalParams { id: 42, index: 3 }));
        assert_eq!(location.to_url(), "/search/cats?o=landscape&image=42&i=3");
    }

    #[test]
    fn test_parse_without_query() {
        let location = Location::parse("/search");
        assert_eq!(location.path(), "/search");
        assert_eq!(location.modal(), None);
        assert_eq!(location.to_url(), "/search");
    }

    #[test]
    fn test_malformed_modal_params_are_ignored() {
        assert_eq!(Location::parse("/s?image=x&i=1").modal(), None);
        assert_eq!(Location::parse("/s?image=5").modal(), None);
        assert_eq!(Location::parse("/s?image=5&i=-1").modal(), None);
    }

    #[test]
    fn test_special_characters_round_trip() {
        let base = Location::new(route_path(&["search", "cats & dogs?#1"]))
            .with_param("q", "a=b&c d");
        let open = base.clone().with_modal(ModalParams { id: 7, index: 3 });

        let reparsed = Location::parse(&open.to_url());
        assert_eq!(reparsed, open);
        assert_eq!(reparsed.modal(), Some(ModalParams { id: 7, index: 3 }));
        assert_eq!(reparsed.param("q"), Some("a=b&c d"));
        assert_eq!(reparsed.without_modal(), base);
    }

    #[test]
    fn test_new_encodes_raw_path() {
        let location = Location::new("/search/red fox");
        assert_eq!(location.path(), "/search/red%20fox");
        assert_eq!(Location::parse("/search/red fox"), location);
    }

    #[test]
    fn test_with_and_without_modal() {
        let base = Location::new("/search/cats").with_param("o", "portrait");
        let open = base.clone().with_modal(ModalParams { id: 9, index: 0 });
        assert_eq!(open.display_path(), "/image/9");

        let moved = open.with_modal(ModalParams { id: 10, index: 1 });
        assert_eq!(moved.param("image"), Some("10"));
        assert_eq!(moved.to_url(), "/search/cats?o=portrait&image=10&i=1");

        assert_eq!(moved.without_modal(), base);
    }
}
