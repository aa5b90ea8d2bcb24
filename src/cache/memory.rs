//! In-Memory Cache Module
//!
//! Thread-safe wrapper around [`CacheStore`]: one exclusive lock guards the table
//! and the recency list, and an optional background task sweeps expired entries.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, Capacity};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::{spawn_sweeper, SweepHandle};

/// Store shared between callers and the sweep task.
pub type SharedStore<V> = Arc<Mutex<CacheStore<V>>>;

// == Memory Cache ==
/// In-process LRU cache with per-entry TTL, safe to share across threads.
///
/// Every operation takes the lock exactly once and releases it before
/// returning; nothing is held across an await point. Values are returned by
/// `Clone`, so they must not be mutated through interior mutability after
/// being stored if callers rely on the cached copy staying unchanged.
#[derive(Debug)]
pub struct MemoryCache<V> {
    store: SharedStore<V>,
    sweeper: Option<SweepHandle>,
}

impl<V> MemoryCache<V>
where
    V: Clone + Send + 'static,
{
    // == Constructors ==
    /// Creates a cache holding at most `max_entries` entries (0 = unbounded), without a sweep.
    pub fn new(max_entries: usize) -> Self {
        Self::with_capacity(Capacity::from(max_entries))
    }

    /// Creates a cache with an explicit capacity policy, without a sweep.
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            store: Arc::new(Mutex::new(CacheStore::with_capacity(capacity))),
            sweeper: None,
        }
    }

    /// Creates a cache whose expired entries are also removed every `interval`.
    ///
    /// A zero interval disables the sweep. Must be called inside a Tokio
    /// runtime when the interval is positive.
    pub fn with_sweep(capacity: Capacity, interval: Duration) -> Result<Self> {
        let mut cache = Self::with_capacity(capacity);
        if !interval.is_zero() {
            cache.sweeper = Some(spawn_sweeper(Arc::clone(&cache.store), interval)?);
        }
        Ok(cache)
    }

    /// Builds a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let capacity = config.capacity()?;
        match config.sweep_interval() {
            Some(interval) => Self::with_sweep(capacity, interval),
            None => Ok(Self::with_capacity(capacity)),
        }
    }

    // == Capability Operations ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// Absent and expired keys both yield `CacheError::NotFound`.
    pub fn get(&self, key: &str) -> Result<V> {
        self.store.lock().get(key)
    }

    /// Stores `value` under `key`; `Duration::ZERO` means no expiration.
    pub fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        self.store.lock().set(key, value, ttl);
        Ok(())
    }

    /// Removes `key`, or returns `CacheError::NotFound` if it is absent.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.store.lock().delete(key)
    }

    /// Drops every entry.
    pub fn clear(&self) -> Result<()> {
        self.store.lock().clear();
        Ok(())
    }

    // == Sweep Lifecycle ==
    /// Stops the background sweep.
    ///
    /// Safe to call any number of times, and when no sweep was configured.
    pub fn stop_sweep(&self) {
        if let Some(sweeper) = &self.sweeper {
            sweeper.stop();
        }
    }

    /// Returns true while a sweep is configured and not yet stopped.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .as_ref()
            .is_some_and(|sweeper| !sweeper.is_stopped())
    }

    /// Runs one sweep pass immediately. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.store.lock().purge_expired()
    }

    // == Inspection ==
    /// Checks for a live entry without changing its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.store.lock().contains_at(key, Instant::now())
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.store.lock().keys_by_recency()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    pub fn capacity(&self) -> Capacity {
        self.store.lock().capacity()
    }

    /// Number of stored entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}
