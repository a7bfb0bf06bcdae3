//! Service Module
//!
//! The search service orchestrating validation, cache policy and HTTP
//! calls for every operation the widget UI performs.

mod search;

pub use search::SearchService;
