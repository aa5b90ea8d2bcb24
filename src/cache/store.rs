//! Cache Store Module
//!
//! Main cache engine combining the key table with the recency list and TTL expiration.
//! The store itself is single-threaded; [`MemoryCache`](crate::cache::MemoryCache) puts it
//! behind a lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, Capacity, RecencyList};
use crate::error::{CacheError, Result};

/// One node payload in the recency list.
#[derive(Debug)]
struct Slot<V> {
    key: String,
    entry: CacheEntry<V>,
}

// == Cache Store ==
/// Key/value storage with LRU eviction and TTL support.
///
/// `table` maps each key to its slot in `list`; every slot in `list` is
/// reachable from exactly one key in `table`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to recency-list slot
    table: HashMap<String, usize>,
    /// Entries ordered from most to least recently used
    list: RecencyList<Slot<V>>,
    /// Entry bound
    capacity: Capacity,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store holding at most `max_entries` entries (0 = unbounded).
    pub fn new(max_entries: usize) -> Self {
        Self::with_capacity(Capacity::from(max_entries))
    }

    /// Creates an empty store with an explicit capacity policy.
    pub fn with_capacity(capacity: Capacity) -> Self {
        let reserve = capacity.limit().unwrap_or(0).min(4096);
        Self {
            table: HashMap::with_capacity(reserve),
            list: RecencyList::with_capacity(reserve),
            capacity,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Result<V> {
        self.get_at(key, Instant::now())
    }

    /// [`get`](Self::get) evaluated at an explicit instant.
    ///
    /// An expired entry is removed and reported as `NotFound`.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Result<V> {
        let Some(&idx) = self.table.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        };

        match self.list.get(idx) {
            Some(slot) if !slot.entry.is_expired_at(now) => {
                let value = slot.entry.value.clone();
                self.list.move_to_front(idx);
                self.stats.record_hit();
                Ok(value)
            }
            _ => {
                self.remove_entry(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Set ==
    /// Stores a key-value pair; a zero `ttl` means the entry never expires.
    ///
    /// An existing key is updated in place and promoted without evicting
    /// anything. A new key evicts the least recently used entry first if the
    /// store is full.
    pub fn set(&mut self, key: &str, value: V, ttl: Duration) {
        self.set_at(key, value, ttl, Instant::now());
    }

    /// [`set`](Self::set) evaluated at an explicit instant.
    pub fn set_at(&mut self, key: &str, value: V, ttl: Duration, now: Instant) {
        if let Some(&idx) = self.table.get(key) {
            if let Some(slot) = self.list.get_mut(idx) {
                if slot.entry.is_expired_at(now) {
                    self.stats.record_expirations(1);
                }
                slot.entry.refresh(value, ttl, now);
                self.list.move_to_front(idx);
                return;
            }
        }

        if let Some(limit) = self.capacity.limit() {
            if self.table.len() >= limit {
                self.evict_lru();
            }
        }

        let idx = self.list.push_front(Slot {
            key: key.to_string(),
            entry: CacheEntry::new(value, ttl, now),
        });
        self.table.insert(key.to_string(), idx);
    }

    // == Delete ==
    /// Removes an entry by key.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        match self.remove_entry(key) {
            Some(_) => Ok(()),
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Clear ==
    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.table.clear();
        self.list.clear();
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// [`purge_expired`](Self::purge_expired) evaluated at an explicit instant.
    pub fn purge_expired_at(&mut self, now: Instant) -> usize {
        let expired_keys: Vec<String> = self
            .list
            .iter()
            .filter(|slot| slot.entry.is_expired_at(now))
            .map(|slot| slot.key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    // == Inspection ==
    /// Checks for a live entry without promoting it.
    pub fn contains_at(&self, key: &str, now: Instant) -> bool {
        self.table
            .get(key)
            .and_then(|&idx| self.list.get(idx))
            .is_some_and(|slot| !slot.entry.is_expired_at(now))
    }

    /// Keys from most to least recently used, expired entries included.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.list.iter().map(|slot| slot.key.clone()).collect()
    }

    /// Returns a snapshot of the statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.table.len());
        stats
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let idx = self.table.remove(key)?;
        self.list.remove(idx).map(|slot| slot.entry)
    }

    fn evict_lru(&mut self) {
        let Some(idx) = self.list.back() else {
            return;
        };
        if let Some(slot) = self.list.remove(idx) {
            self.table.remove(&slot.key);
            self.stats.record_eviction();
        }
    }

    /// Checks table/list bijection and the capacity bound.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.list.assert_consistent();
        assert_eq!(self.table.len(), self.list.len(), "table and list sizes differ");
        for (key, &idx) in &self.table {
            let slot = self.list.get(idx).expect("table points at a vacant slot");
            assert_eq!(&slot.key, key, "slot {} holds the wrong key", idx);
        }
        if let Some(limit) = self.capacity.limit() {
            assert!(self.table.len() <= limit, "store exceeds its capacity");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity().limit(), Some(100));
        store.assert_invariants();
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), Duration::ZERO);

        assert_eq!(store.get("key1").unwrap(), "value1");
        assert_eq!(store.len(), 1);
        store.assert_invariants();
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: CacheStore<String> = CacheStore::new(100);

        let result = store.get("nonexistent");
        assert_eq!(result, Err(CacheError::NotFound("nonexistent".to_string())));
    }

    #[test]
    fn test_store_delete_twice() {
        let mut store = CacheStore::new(100);

        store.set("k", "v", Duration::ZERO);
        store.delete("k").unwrap();

        assert!(store.is_empty());
        assert!(store.get("k").unwrap_err().is_not_found());
        assert!(store.delete("k").unwrap_err().is_not_found());
        store.assert_invariants();
    }

    #[test]
    fn test_store_overwrite_keeps_count_and_promotes() {
        let mut store = CacheStore::new(3);

        store.set("a", 1, Duration::ZERO);
        store.set("b", 2, Duration::ZERO);
        store.set("c", 3, Duration::ZERO);
        store.set("a", 10, Duration::ZERO);

        assert_eq!(store.len(), 3);
        assert_eq!(store.keys_by_recency(), vec!["a", "c", "b"]);
        assert_eq!(store.stats().evictions, 0);
        assert_eq!(store.get("a").unwrap(), 10);
        store.assert_invariants();
    }

    #[test]
    fn test_store_overwrite_at_capacity_never_evicts() {
        let mut store = CacheStore::new(2);

        store.set("a", 1, Duration::ZERO);
        store.set("b", 2, Duration::ZERO);
        store.set("b", 20, Duration::ZERO);
        store.set("a", 10, Duration::ZERO);

        assert_eq!(store.get("a").unwrap(), 10);
        assert_eq!(store.get("b").unwrap(), 20);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(2);

        store.set("a", 1, Duration::ZERO);
        store.set("b", 2, Duration::ZERO);
        store.set("c", 3, Duration::ZERO);

        assert!(store.get("a").unwrap_err().is_not_found());
        assert_eq!(store.get("b").unwrap(), 2);
        assert_eq!(store.get("c").unwrap(), 3);
        assert_eq!(store.stats().evictions, 1);
        store.assert_invariants();
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::new(3);

        store.set("key1", "value1", Duration::ZERO);
        store.set("key2", "value2", Duration::ZERO);
        store.set("key3", "value3", Duration::ZERO);

        // Access key1 to make it most recently used
        store.get("key1").unwrap();

        // Adding key4 should evict key2 (now oldest)
        store.set("key4", "value4", Duration::ZERO);

        assert!(store.get("key1").is_ok());
        assert!(store.get("key2").is_err());
        store.assert_invariants();
    }

    #[test]
    fn test_store_unbounded_never_evicts() {
        let mut store = CacheStore::with_capacity(Capacity::new(0));

        for i in 0..1000 {
            store.set(&format!("key{}", i), i, Duration::ZERO);
        }

        assert_eq!(store.len(), 1000);
        assert_eq!(store.get("key0").unwrap(), 0);
        assert_eq!(store.stats().evictions, 0);
        store.assert_invariants();
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100);
        let now = Instant::now();

        store.set_at("key1", "value1", secs(1), now);

        assert_eq!(store.get_at("key1", now).unwrap(), "value1");
        assert_eq!(
            store.get_at("key1", now + Duration::from_millis(999)).unwrap(),
            "value1"
        );

        let result = store.get_at("key1", now + secs(1));
        assert!(result.unwrap_err().is_not_found());
        assert!(store.is_empty(), "expired entry must be removed on lookup");
        assert_eq!(store.stats().expirations, 1);
        store.assert_invariants();
    }

    #[test]
    fn test_store_expired_entry_stays_until_observed() {
        let mut store = CacheStore::new(100);
        let now = Instant::now();

        store.set_at("k", "v", secs(1), now);

        assert_eq!(store.len(), 1);
        assert!(!store.contains_at("k", now + secs(2)));
        assert_eq!(store.len(), 1, "contains must not remove anything");
    }

    #[test]
    fn test_store_set_revives_expired_key() {
        let mut store = CacheStore::new(100);
        let now = Instant::now();

        store.set_at("k", "old", secs(1), now);
        store.set_at("k", "new", Duration::ZERO, now + secs(5));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_at("k", now + secs(3600)).unwrap(), "new");
        assert_eq!(store.stats().expirations, 1);
        store.assert_invariants();
    }

    #[test]
    fn test_store_no_ttl_is_permanent() {
        let mut store = CacheStore::new(100);
        let now = Instant::now();

        store.set_at("k", "v", Duration::ZERO, now);

        assert_eq!(store.get_at("k", now + secs(365 * 24 * 3600)).unwrap(), "v");
    }

    #[test]
    fn test_store_purge_expired() {
        let mut store = CacheStore::new(100);
        let now = Instant::now();

        store.set_at("key1", "value1", secs(1), now);
        store.set_at("key2", "value2", secs(1), now);
        store.set_at("key3", "value3", secs(10), now);
        store.set_at("key4", "value4", Duration::ZERO, now);

        let removed = store.purge_expired_at(now + secs(2));

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.keys_by_recency(), vec!["key4", "key3"]);
        store.assert_invariants();
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new(100);

        store.set("x", "1", Duration::ZERO);
        store.set("y", "2", Duration::ZERO);
        store.clear();

        assert!(store.is_empty());
        assert!(store.get("x").is_err());
        assert!(store.get("y").is_err());
        store.assert_invariants();

        store.set("z", "3", Duration::ZERO);
        assert_eq!(store.get("z").unwrap(), "3");
        store.assert_invariants();
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1", Duration::ZERO);
        store.get("key1").unwrap(); // hit
        let _ = store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_slot_reuse_after_eviction() {
        let mut store = CacheStore::new(2);

        for round in 0..10 {
            store.set(&format!("k{}", round), round, Duration::ZERO);
            store.assert_invariants();
        }

        assert_eq!(store.keys_by_recency(), vec!["k9", "k8"]);
    }
}
