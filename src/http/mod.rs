//! HTTP layer: response abstraction and paginating client
//!
//! [`HttpResponse`] is the owned response shape the pagination strategies
//! consume; [`RestClient`] and [`PageIter`] form the fetch loop that drives
//! one strategy per sequence.

mod client;
mod response;

pub use client::{ClientConfig, ClientConfigBuilder, PageIter, RestClient};
pub use response::HttpResponse;

#[cfg(test)]
mod tests;
