//! Server-side proxy for the remote image API
//!
//! Clients never see the API key. They send `{e, p, q, o}` (endpoint, page,
//! query, orientation); the proxy builds the upstream URL, attaches the key
//! and hands back the raw JSON body, or a 500 carrying the error payload.

use super::error::FetchError;
use super::types::{Endpoint, Orientation, PER_PAGE};
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Query accepted by the proxy endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyQuery {
    /// Endpoint name (`curated`, `search`, `photos/<id>`)
    #[serde(default)]
    pub e: Option<String>,
    /// Page number, defaults to 1
    #[serde(default)]
    pub p: Option<String>,
    /// Search text (search endpoint only)
    #[serde(default)]
    pub q: Option<String>,
    /// Orientation filter, defaults to `all`
    #[serde(default)]
    pub o: Option<String>,
}

impl ProxyQuery {
    /// Query for one page of an endpoint
    #[must_use]
    pub fn page(endpoint: Endpoint, page: u32) -> Self {
        Self {
            e: Some(endpoint.name()),
            p: Some(page.to_string()),
            q: None,
            o: None,
        }
    }

    /// Attach search text
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.q = Some(query.into());
        self
    }

    /// Attach an orientation filter
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.o = Some(orientation.as_str().to_string());
        self
    }

    fn endpoint(&self) -> Result<Endpoint, FetchError> {
        self.e.as_deref().unwrap_or_default().parse()
    }

    fn page_number(&self) -> Result<u32, FetchError> {
        match self.p.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some(raw) => match raw.parse::<u32>() {
                Ok(page) if page >= 1 => Ok(page),
                _ => Err(FetchError::InvalidPage(raw.to_string())),
            },
        }
    }

    fn orientation(&self) -> Result<Orientation, FetchError> {
        self.o.as_deref().unwrap_or("all").parse()
    }
}

/// Build the upstream URL for a proxy query
///
/// Photo lookups carry no paging parameters. Paged endpoints always send
/// `page` and `per_page`; `query` is sent for search only and `orientation`
/// only when it is not `all`.
///
/// # Errors
///
/// Returns `FetchError` if the endpoint is unknown, the page or orientation
/// is malformed, a search has no query, or the URL cannot be joined.
pub fn upstream_url(base: &Url, query: &ProxyQuery) -> Result<Url, FetchError> {
    let endpoint = query.endpoint()?;
    let mut url = base
        .join(&endpoint.path())
        .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    if let Endpoint::Photo(_) = endpoint {
        return Ok(url);
    }

    let page = query.page_number()?;
    let orientation = query.orientation()?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("page", &page.to_string());
        pairs.append_pair("per_page", &PER_PAGE.to_string());

        if endpoint == Endpoint::Search {
            let text = query.q.as_deref().map(str::trim).unwrap_or_default();
            if text.is_empty() {
                return Err(FetchError::MissingQuery);
            }
            pairs.append_pair("query", text);
        }

        if let Some(filter) = orientation.as_filter() {
            pairs.append_pair("orientation", filter);
        }
    }

    Ok(url)
}

/// Status and JSON body answered by the proxy
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw upstream body, or `{"error": ...}`
    pub body: Value,
}

impl ProxyResponse {
    /// Whether the upstream call succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == 200
    }

    fn from_error(error: &FetchError) -> Self {
        Self {
            status: error.proxy_status(),
            body: json!({ "error": error.to_string() }),
        }
    }
}

/// Forwards image requests to the remote API with the secret key attached
pub struct ImageProxy {
    base: Url,
    api_key: String,
    client: Client,
}

impl fmt::Debug for ImageProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageProxy")
            .field("base", &self.base.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ImageProxy {
    /// Create a proxy for the API rooted at `endpoint`
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the endpoint is not a valid URL or the HTTP
    /// client cannot be built.
    pub fn new(endpoint: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base = Url::parse(endpoint).map_err(|e| FetchError::InvalidUrl(format!("{endpoint}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("scatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base,
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a proxy from the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the configured endpoint is invalid.
    pub fn from_config(config: &crate::config::ScatchConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.api_endpoint,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// API root this proxy forwards to
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Forward a query and return the decoded JSON body
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the query is invalid, the request fails,
    /// upstream answers with a non-success status, or the body is not JSON.
    pub fn forward(&self, query: &ProxyQuery) -> Result<Value, FetchError> {
        let url = upstream_url(&self.base, query)?;
        debug!(url = %url, "forwarding image request");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.api_key.as_str())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Handle one proxy request
    ///
    /// Never fails: errors become a 400 (bad query) or 500 (upstream) response
    /// whose body carries the error message.
    #[must_use]
    pub fn handle(&self, query: &ProxyQuery) -> ProxyResponse {
        match self.forward(query) {
            Ok(body) => ProxyResponse { status: 200, body },
            Err(e) => {
                warn!(error = %e, endpoint = ?query.e, "proxy request failed");
                ProxyResponse::from_error(&e)
            }
        }
    }
}
