//! Request and Response models for the search API client
//!
//! Defines the value objects callers hand in (search/autocomplete
//! parameters) and the canonical typed shapes of backend payloads.

pub mod params;
pub mod responses;

// Re-export commonly used types
pub use params::{AutocompleteParams, FilterSelection, SearchParams, SortOption, StockStatus};
pub use responses::{
    AutocompletePayload, FacetBucket, FacetConfig, PopularPayload, Product, SearchResponse,
};
