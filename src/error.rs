//! Error types for pagekit
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pagekit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Pagination Errors
    // ============================================================================
    /// A pagination signal field is structurally missing or unusable in an
    /// otherwise successful response. Never retried internally: it indicates
    /// an API contract mismatch the paginator cannot resolve.
    #[error("Invalid response shape: field '{field}': {message}")]
    InvalidResponseShape { field: String, message: String },

    /// The response body could not be decoded as JSON. Distinct from a
    /// missing field: a body that fails to decode is never treated as
    /// "no next page".
    #[error("Failed to decode response body: {0}")]
    ResponseDecode(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Create an invalid response shape error
    pub fn invalid_shape(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponseShape {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for pagekit
pub type Result<T> = std::result::Result<T, Error>;
