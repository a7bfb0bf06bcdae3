//! Client Module
//!
//! The retrying HTTP transport used by the search service.

mod http;

pub use http::{HttpClient, RequestOptions, RetryConfig};
