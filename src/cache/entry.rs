//! Cache Entry Module
//!
//! Defines the payload stored for each key: the caller's value plus an optional deadline.

use std::time::{Duration, Instant};

use crate::cache::expiry;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// The value is opaque to the cache. It is moved in on `set` and handed back
/// by `Clone` on `get`; store an `Arc<T>` to share one allocation.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiry instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after `now` (never, if `ttl` is zero).
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: expiry::deadline(now, ttl),
        }
    }

    // == Refresh ==
    /// Replaces value and deadline in place.
    pub fn refresh(&mut self, value: V, ttl: Duration, now: Instant) {
        self.value = value;
        self.expires_at = expiry::deadline(now, ttl);
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        expiry::is_expired(self.expires_at, now)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_no_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("test_value", Duration::ZERO, now);

        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired_at(now + Duration::from_secs(3600)));
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("test_value", Duration::from_secs(60), now);

        assert_eq!(entry.expires_at, Some(now + Duration::from_secs(60)));
        assert!(!entry.is_expired_at(now));
        assert!(entry.is_expired_at(now + Duration::from_secs(60)));
    }

    #[test]
    fn test_refresh_replaces_value_and_deadline() {
        let now = Instant::now();
        let mut entry = CacheEntry::new(1, Duration::from_secs(1), now);

        entry.refresh(2, Duration::ZERO, now + Duration::from_millis(500));

        assert_eq!(entry.value, 2);
        assert!(entry.expires_at.is_none());
    }
}
