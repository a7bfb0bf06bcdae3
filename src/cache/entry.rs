//! Cache Entry Module
//!
//! Defines the structure of an individual cached response with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cached value with its storage timestamp and time-to-live.
///
/// Entries are owned exclusively by the cache store and never exposed
/// to callers; the store hands out clones of `data` only.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub data: T,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Time-to-live for this entry
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            stored_at: epoch_ms(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's TTL has elapsed.
    ///
    /// Boundary condition: an entry is still fresh when exactly `ttl` has
    /// elapsed and expires strictly after that, i.e. a value stored at T
    /// is served for any read in `[T, T + ttl]` and is a miss afterwards.
    pub fn is_expired(&self) -> bool {
        epoch_ms().saturating_sub(self.stored_at) > self.ttl.as_millis() as u64
    }

    // == Remaining TTL ==
    /// Returns the remaining lifetime in milliseconds (0 once expired).
    ///
    /// Useful for diagnostics; never consulted for eviction decisions.
    pub fn remaining_ms(&self) -> u64 {
        let deadline = self.stored_at + self.ttl.as_millis() as u64;
        deadline.saturating_sub(epoch_ms())
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in milliseconds.
pub fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_fresh_on_creation() {
        let entry = CacheEntry::new("payload", Duration::from_secs(60));

        assert_eq!(entry.data, "payload");
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let entry = CacheEntry::new("payload", Duration::from_millis(30));

        assert!(!entry.is_expired());
        sleep(Duration::from_millis(60));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_entry_fresh_at_exact_ttl_boundary() {
        // Stored "ttl" milliseconds ago: still within the freshness window.
        let mut entry = CacheEntry::new("payload", Duration::from_millis(10_000));
        entry.stored_at = epoch_ms() - 10_000;

        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expired_past_ttl_boundary() {
        let mut entry = CacheEntry::new("payload", Duration::from_millis(10_000));
        entry.stored_at = epoch_ms() - 10_050;

        assert!(entry.is_expired());
    }

    #[test]
    fn test_remaining_ms_counts_down() {
        let entry = CacheEntry::new("payload", Duration::from_secs(10));

        let remaining = entry.remaining_ms();
        assert!(remaining <= 10_000);
        assert!(remaining >= 9_000);
    }

    #[test]
    fn test_remaining_ms_zero_once_expired() {
        let mut entry = CacheEntry::new("payload", Duration::from_millis(100));
        entry.stored_at = epoch_ms() - 5_000;

        assert_eq!(entry.remaining_ms(), 0);
    }
}
