//! Cache Module
//!
//! In-memory response caching with TTL expiration, strict LRU eviction and
//! canonical cache-key construction.

mod entry;
mod key;
mod order;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::build_cache_key;
pub use order::AccessOrder;
pub use stats::CacheStats;
pub use store::ResponseCache;
