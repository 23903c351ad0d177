//! Owned HTTP response with lazy JSON decoding and link-relation parsing
//!
//! Pagination strategies read responses after the transport is done with
//! them, so the body is buffered up front and decoded at most once, on
//! first access.

use crate::error::{Error, Result};
use bytes::Bytes;
use once_cell::sync::OnceCell;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;

/// One received HTTP response: status, headers, and a buffered body.
#[derive(Debug)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    decoded: OnceCell<Value>,
}

impl HttpResponse {
    /// Build a response from parts
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            decoded: OnceCell::new(),
        }
    }

    /// Buffer a live reqwest response
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Self::new(status, headers, body))
    }

    /// Response status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body decoded as JSON, cached after the first call.
    ///
    /// A body that does not decode fails with
    /// [`Error::ResponseDecode`], distinct from any "field absent"
    /// condition a strategy may report.
    pub fn json(&self) -> Result<&Value> {
        self.decoded
            .get_or_try_init(|| serde_json::from_slice(&self.body).map_err(Error::ResponseDecode))
    }

    /// Link-relation mapping (relation name to target URL) parsed from the
    /// `Link` response headers (RFC 5988).
    pub fn links(&self) -> HashMap<String, String> {
        let mut links = HashMap::new();
        for value in self.headers.get_all("link") {
            if let Ok(header) = value.to_str() {
                parse_link_header(header, &mut links);
            }
        }
        links
    }

    /// Target URL of a single link relation, if present
    pub fn link(&self, rel: &str) -> Option<String> {
        self.links().remove(rel)
    }
}

/// Parse one Link header value into a relation → URL mapping.
///
/// Format: `<url>; rel="next", <url>; rel="prev"`
fn parse_link_header(header: &str, links: &mut HashMap<String, String>) {
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(url), Some(rel)) = (url, rel) {
            links.insert(rel.to_string(), url.to_string());
        }
    }
}
