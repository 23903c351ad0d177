//! # pagekit
//!
//! Pagination strategies and a paginating HTTP client for REST API
//! extraction.
//!
//! The core is the [`Paginator`] contract: a small family of stateful
//! strategies, each encoding a real-world API pagination convention
//! (single page, offset/limit counters, `Link` response headers, body
//! cursors), unified so a caller can swap strategies without changing its
//! request loop.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagekit::{ClientConfig, OffsetPaginator, RestClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = RestClient::with_config(
//!         ClientConfig::builder()
//!             .base_url("https://api.example.com")
//!             .build(),
//!     )?;
//!
//!     let mut pages = client.paginate("items", OffsetPaginator::new(0, 100));
//!     while let Some(page) = pages.next_page().await? {
//!         let body = page.json()?;
//!         // Process body["items"]
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  RestClient / PageIter                  │
//! │   prepare_next_request_args → send → update_state       │
//! └────────────────────────────┬────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴────────────┬───────────────┐
//! │  SinglePage  │  Offset      │ HeaderLink│  JsonResponse │
//! ├──────────────┼──────────────┼───────────┼───────────────┤
//! │ one request  │ offset/limit │ Link rel  │ body `next`   │
//! │              │ vs. total    │ "next"    │ field         │
//! └──────────────┴──────────────┴───────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

/// Error types
pub mod error;

/// HTTP response abstraction and paginating client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// URL and JSON accessor helpers
pub mod utils;

pub use error::{Error, Result};
pub use http::{ClientConfig, HttpResponse, PageIter, RestClient};
pub use pagination::{
    HeaderLinkPaginator, JsonResponsePaginator, NextReference, OffsetPaginator, PageState,
    Paginator, Params, RequestArgs, SinglePagePaginator,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
