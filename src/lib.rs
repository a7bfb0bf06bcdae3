//! Storesearch Client - a resilient, cached search API client
//!
//! The HTTP request layer of an embeddable storefront search widget:
//! a typed error taxonomy, a retrying HTTP client with per-attempt
//! timeouts and exponential backoff, a TTL-aware LRU response cache, and
//! a search service orchestrating cache policy and normalization for the
//! search, autocomplete, facet-configuration and popular-searches
//! operations.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use cache::{build_cache_key, CacheStats, ResponseCache};
pub use client::{HttpClient, RequestOptions, RetryConfig};
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use models::{FilterSelection, SearchParams, SearchResponse, SortOption};
pub use service::SearchService;
