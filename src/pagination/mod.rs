//! Pagination module
//!
//! Supports: single page, offset/limit, link header, JSON body cursor
//!
//! # Overview
//!
//! Four interchangeable strategies behind one [`Paginator`] contract. Each
//! strategy consumes one HTTP response at a time and answers two questions:
//! is there another page, and how do I ask for it. The surrounding fetch
//! loop calls [`Paginator::prepare_next_request_args`] once per outgoing
//! request and [`Paginator::update_state`] once per response, until
//! [`Paginator::has_next_page`] turns false.

mod strategies;
mod types;

pub use strategies::{
    HeaderLinkPaginator, JsonResponsePaginator, OffsetPaginator, SinglePagePaginator,
};
pub use types::{NextReference, PageState, Paginator, Params, RequestArgs};
