//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::Result;
use crate::http::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query parameters or request body for an outgoing request.
///
/// A JSON object keeps numeric pagination values (offsets, limits) numeric
/// instead of flattening everything to strings.
pub type Params = Map<String, Value>;

/// The `(url, params, body)` triple for one outgoing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestArgs {
    /// Request URL
    pub url: String,
    /// Query parameters (string keys to scalar values)
    pub params: Params,
    /// JSON request body (empty for GET-style APIs)
    pub body: Params,
}

impl RequestArgs {
    /// Create request args for a URL with empty params and body
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Params::new(),
            body: Params::new(),
        }
    }

    /// Set query parameters
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Set the request body
    #[must_use]
    pub fn with_body(mut self, body: Params) -> Self {
        self.body = body;
        self
    }
}

/// Strategy-specific token identifying the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextReference {
    /// A full next-page URL (link header or response body)
    Url(String),
    /// A computed item offset
    Offset(u64),
}

impl NextReference {
    /// Get the URL if this reference is one
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Offset(_) => None,
        }
    }

    /// Get the offset if this reference is one
    pub fn as_offset(&self) -> Option<u64> {
        match self {
            Self::Offset(offset) => Some(*offset),
            Self::Url(_) => None,
        }
    }
}

/// Shared lifecycle of every pagination strategy.
///
/// `Unstarted` and `HasMore` both report a next page, so a caller always
/// attempts at least one fetch. `Exhausted` is terminal: re-evaluating a
/// terminal response yields `Exhausted` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// No response processed yet
    #[default]
    Unstarted,
    /// The last response carried a next-page signal
    HasMore,
    /// No more pages
    Exhausted,
}

impl PageState {
    /// Whether another request should be issued
    pub fn has_next_page(self) -> bool {
        !matches!(self, Self::Exhausted)
    }
}

/// Core trait for pagination strategies.
///
/// The owning fetch loop alternates the two operations: once per outgoing
/// request it calls [`prepare_next_request_args`](Self::prepare_next_request_args),
/// once per received response it calls [`update_state`](Self::update_state),
/// and it stops when [`has_next_page`](Self::has_next_page) turns false.
///
/// One instance serves one fetch sequence. Strategies are plain mutable
/// values with no internal synchronization; do not share one across
/// concurrent sequences.
pub trait Paginator: Send {
    /// Whether another request should be issued. True until the first
    /// processed response proves otherwise.
    fn has_next_page(&self) -> bool;

    /// The token identifying the next page, if one is known.
    fn next_reference(&self) -> Option<NextReference>;

    /// Derive the pagination state from one received response.
    ///
    /// Fails with [`Error::InvalidResponseShape`](crate::Error::InvalidResponseShape)
    /// when a required signal field is structurally absent, and propagates
    /// [`Error::ResponseDecode`](crate::Error::ResponseDecode) when a needed
    /// body does not decode. Neither condition is ever mapped to "no next
    /// page".
    fn update_state(&mut self, response: &HttpResponse) -> Result<()>;

    /// Merge this strategy's next-page information into the request that
    /// would otherwise be reused verbatim.
    ///
    /// Inputs are never mutated; the caller receives updated copies with
    /// pagination keys added or overwritten. Only meaningful while
    /// [`has_next_page`](Self::has_next_page) is true.
    fn prepare_next_request_args(&self, url: &str, params: &Params, body: &Params) -> RequestArgs;
}
