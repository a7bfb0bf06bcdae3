//! Access Order Module
//!
//! Tracks recency of use for the cache's LRU eviction policy.

use std::collections::VecDeque;

// == Access Order ==
/// Ordered sequence of cache keys by recency of use.
///
/// Keys live in a VecDeque where:
/// - Front = least recently used (next eviction victim)
/// - Back = most recently used
///
/// Invariant: every key held by the cache map appears exactly once here,
/// and vice versa. The store upholds this by pairing every map mutation
/// with the matching order mutation.
#[derive(Debug, Default)]
pub struct AccessOrder {
    /// Keys ordered from least to most recently used
    order: VecDeque<String>,
}

impl AccessOrder {
    // == Constructor ==
    /// Creates a new empty access order.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Promote ==
    /// Marks a key as most recently used (moves it to the back).
    ///
    /// An already-tracked key is removed from its old position first;
    /// a new key is simply appended.
    pub fn promote(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the order. No-op for untracked keys.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop LRU ==
    /// Removes and returns the least recently used key, if any.
    pub fn pop_lru(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek LRU ==
    /// Returns the least recently used key without removing it.
    pub fn peek_lru(&self) -> Option<&String> {
        self.order.front()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Clear ==
    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Contains ==
    /// Checks whether a key is currently tracked.
    #[allow(dead_code)]
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
