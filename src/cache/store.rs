//! Response Cache Module
//!
//! Main cache engine combining HashMap storage with LRU access tracking
//! and lazy TTL expiration. Avoids redundant network calls for repeated
//! identical requests within a bounded time window and memory footprint.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{AccessOrder, CacheEntry, CacheStats};

// == Response Cache ==
/// In-memory, TTL-aware, size-bounded, LRU-evicting key->value store.
///
/// Expiry is checked lazily on read; there is no background sweep.
/// Capacity is enforced only at `set` time, so the cache can exceed
/// `max_size` only transiently between eviction and insert.
#[derive(Debug)]
pub struct ResponseCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Recency-of-use tracking for eviction
    order: AccessOrder,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
}

impl<T: Clone> ResponseCache<T> {
    // == Constructor ==
    /// Creates a new cache bounded to `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: AccessOrder::new(),
            stats: CacheStats::new(),
            max_size: max_size.max(1),
        }
    }

    // == Get ==
    /// Returns the cached value for `key` if present and fresh.
    ///
    /// A stale entry is evicted and counted as a miss. A hit promotes the
    /// key to most-recently-used and hands back a clone of the value.
    pub fn get(&mut self, key: &str) -> Option<T> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.evict(key);
                self.stats.record_miss();
                debug!(key, "cache entry expired");
                return None;
            }

            let data = entry.data.clone();
            self.stats.record_hit();
            self.order.promote(key);
            Some(data)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Set ==
    /// Stores `data` under `key` with the given TTL.
    ///
    /// Overwriting an existing key first removes its prior entry and order
    /// slot. When the cache is at capacity the least-recently-used key is
    /// evicted before the insert.
    pub fn set(&mut self, key: &str, data: T, ttl: Duration) {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
        }

        if self.entries.len() >= self.max_size {
            if let Some(victim) = self.order.pop_lru() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!(key = %victim, "evicted least recently used entry");
            }
        }

        self.entries.insert(key.to_string(), CacheEntry::new(data, ttl));
        self.order.promote(key);
        self.stats.set_size(self.entries.len());
    }

    // == Has ==
    /// Checks whether a fresh entry exists for `key`.
    ///
    /// Performs the same lazy-expiry eviction as `get`, but touches
    /// neither the hit/miss counters nor the recency order. Used for
    /// cache-policy decisions, not counted as a lookup.
    pub fn has(&mut self, key: &str) -> bool {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.evict(key);
                return false;
            }
            true
        } else {
            false
        }
    }

    // == Delete ==
    /// Removes an entry regardless of its TTL. Returns true if it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.order.remove(key);
            self.stats.set_size(self.entries.len());
        }
        existed
    }

    // == Clear ==
    /// Drops all entries and resets the access order and every counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats = CacheStats::new();
    }

    // == Stats ==
    /// Returns a snapshot of the current counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes a known-stale entry and its order slot.
    fn evict(&mut self, key: &str) {
        self.entries.remove(key);
        self.order.remove(key);
        self.stats.set_size(self.entries.len());
    }
}
