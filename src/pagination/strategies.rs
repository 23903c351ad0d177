//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{NextReference, PageState, Paginator, Params, RequestArgs};
use crate::error::{Error, Result};
use crate::http::HttpResponse;
use crate::utils::nested_get;
use serde_json::Value;

/// Default body field / link relation carrying the next-page URL
const DEFAULT_NEXT_KEY: &str = "next";

// ============================================================================
// Single Page
// ============================================================================

/// Single-page strategy: exactly one request, no pagination.
///
/// Intentionally ignores pagination hints in the response (body `next`
/// fields, `Link` headers). Selecting this strategy is the caller's
/// statement that the API returns everything in one response.
#[derive(Debug, Clone, Default)]
pub struct SinglePagePaginator {
    state: PageState,
}

impl SinglePagePaginator {
    /// Create a new single-page paginator
    pub fn new() -> Self {
        Self::default()
    }
}

impl Paginator for SinglePagePaginator {
    fn has_next_page(&self) -> bool {
        self.state.has_next_page()
    }

    fn next_reference(&self) -> Option<NextReference> {
        None
    }

    fn update_state(&mut self, _response: &HttpResponse) -> Result<()> {
        self.state = PageState::Exhausted;
        Ok(())
    }

    fn prepare_next_request_args(&self, url: &str, params: &Params, body: &Params) -> RequestArgs {
        RequestArgs {
            url: url.to_string(),
            params: params.clone(),
            body: body.clone(),
        }
    }
}

// ============================================================================
// Offset / Limit
// ============================================================================

/// Offset/limit pagination against a server-reported total count.
///
/// Each request carries `offset` and `limit` query parameters; the response
/// body reports the total item count in a `total` field. Common pattern:
/// `?offset=100&limit=50` with `{"total": 1234, ...}` bodies.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    offset: u64,
    limit: u64,
    /// Total count reported by the last processed response
    total: Option<u64>,
    state: PageState,
}

impl OffsetPaginator {
    /// Create an offset paginator with an initial offset and a page size
    pub fn new(initial_offset: u64, limit: u64) -> Self {
        Self {
            offset: initial_offset,
            limit,
            total: None,
            state: PageState::Unstarted,
        }
    }

    /// Current offset
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Page size
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Total count reported by the server, once a response was processed
    pub fn total(&self) -> Option<u64> {
        self.total
    }
}

impl Paginator for OffsetPaginator {
    fn has_next_page(&self) -> bool {
        self.state.has_next_page()
    }

    fn next_reference(&self) -> Option<NextReference> {
        match self.state {
            PageState::Exhausted => None,
            PageState::Unstarted | PageState::HasMore => Some(NextReference::Offset(self.offset)),
        }
    }

    fn update_state(&mut self, response: &HttpResponse) -> Result<()> {
        let body = response.json()?;
        let total = body
            .get("total")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::invalid_shape("total", "expected an integer total count"))?;

        self.total = Some(total);
        // The counter advances on every processed response; `offset + limit
        // == total` therefore lands exactly on `total` and is exhaustion.
        self.offset += self.limit;
        self.state = if self.offset < total {
            PageState::HasMore
        } else {
            PageState::Exhausted
        };
        Ok(())
    }

    fn prepare_next_request_args(&self, url: &str, params: &Params, body: &Params) -> RequestArgs {
        let mut params = params.clone();
        params.insert("offset".to_string(), Value::from(self.offset));
        params.insert("limit".to_string(), Value::from(self.limit));
        RequestArgs {
            url: url.to_string(),
            params,
            body: body.clone(),
        }
    }
}

// ============================================================================
// Header Link (RFC 5988)
// ============================================================================

/// Link-header pagination (RFC 5988).
///
/// Follows the `Link` response header relation `"next"`. Common in GitHub
/// and GitLab APIs:
/// `Link: <https://api.github.com/...?page=2>; rel="next", ...`
#[derive(Debug, Clone)]
pub struct HeaderLinkPaginator {
    /// Link relation to follow
    rel: String,
    next_url: Option<String>,
    state: PageState,
}

impl Default for HeaderLinkPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_NEXT_KEY)
    }
}

impl HeaderLinkPaginator {
    /// Create a paginator following the given link relation
    pub fn new(rel: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            next_url: None,
            state: PageState::Unstarted,
        }
    }
}

impl Paginator for HeaderLinkPaginator {
    fn has_next_page(&self) -> bool {
        self.state.has_next_page()
    }

    fn next_reference(&self) -> Option<NextReference> {
        self.next_url.clone().map(NextReference::Url)
    }

    fn update_state(&mut self, response: &HttpResponse) -> Result<()> {
        match response.link(&self.rel) {
            Some(url) => {
                self.next_url = Some(url);
                self.state = PageState::HasMore;
            }
            None => {
                self.next_url = None;
                self.state = PageState::Exhausted;
            }
        }
        Ok(())
    }

    fn prepare_next_request_args(&self, url: &str, params: &Params, body: &Params) -> RequestArgs {
        // The link header already encodes full next-page semantics, so the
        // stored URL replaces the given one verbatim. With no reference yet
        // (first request) the given URL passes through.
        RequestArgs {
            url: self.next_url.clone().unwrap_or_else(|| url.to_string()),
            params: params.clone(),
            body: body.clone(),
        }
    }
}

// ============================================================================
// JSON Response Body
// ============================================================================

/// Body-cursor pagination: a field in the JSON response body carries the
/// full next-page URL.
///
/// Common patterns, with a null or absent field on the last page:
/// - `{"next": "https://api.example.com/items?page=2", ...}`
/// - `{"pagination": {"next": "..."}}` (nested path)
#[derive(Debug, Clone)]
pub struct JsonResponsePaginator {
    /// Key path to the next URL inside the body
    next_path: Vec<String>,
    next_url: Option<String>,
    state: PageState,
}

impl Default for JsonResponsePaginator {
    fn default() -> Self {
        Self::new(DEFAULT_NEXT_KEY)
    }
}

impl JsonResponsePaginator {
    /// Create a paginator reading the given top-level body key
    pub fn new(next_key: impl Into<String>) -> Self {
        Self {
            next_path: vec![next_key.into()],
            next_url: None,
            state: PageState::Unstarted,
        }
    }

    /// Create a paginator reading a nested key path
    pub fn from_path(path: &[&str]) -> Self {
        Self {
            next_path: path.iter().map(ToString::to_string).collect(),
            next_url: None,
            state: PageState::Unstarted,
        }
    }
}

impl Paginator for JsonResponsePaginator {
    fn has_next_page(&self) -> bool {
        self.state.has_next_page()
    }

    fn next_reference(&self) -> Option<NextReference> {
        self.next_url.clone().map(NextReference::Url)
    }

    fn update_state(&mut self, response: &HttpResponse) -> Result<()> {
        let body = response.json()?;
        let path: Vec<&str> = self.next_path.iter().map(String::as_str).collect();
        match nested_get(body, &path) {
            Some(Value::String(url)) => {
                self.next_url = Some(url.clone());
                self.state = PageState::HasMore;
            }
            None | Some(Value::Null) => {
                self.next_url = None;
                self.state = PageState::Exhausted;
            }
            Some(other) => {
                return Err(Error::invalid_shape(
                    self.next_path.join("."),
                    format!("expected a next-page URL string, got {other}"),
                ));
            }
        }
        Ok(())
    }

    fn prepare_next_request_args(&self, url: &str, params: &Params, body: &Params) -> RequestArgs {
        RequestArgs {
            url: self.next_url.clone().unwrap_or_else(|| url.to_string()),
            params: params.clone(),
            body: body.clone(),
        }
    }
}
