//! Capability Contract
//!
//! The operation set every cache backend exposes, so callers can swap the
//! in-process store for a remote one without changing call sites.

use std::time::Duration;

use crate::cache::MemoryCache;
use crate::error::Result;

// == Cache Trait ==
/// Get/Set/Delete/Clear over string keys.
///
/// Every backend reports an absent key as `CacheError::NotFound`. Remote
/// backends additionally report transport failures as `CacheError::Backend`.
pub trait Cache<V>: Send + Sync {
    /// Retrieves the value stored under `key`.
    fn get(&self, key: &str) -> Result<V>;

    /// Stores `value` under `key`. `Duration::ZERO` means no expiration,
    /// otherwise the entry expires `ttl` after this call.
    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()>;

    /// Removes `key`; `CacheError::NotFound` if nothing was removed.
    fn delete(&self, key: &str) -> Result<()>;

    /// Removes every entry in this backend's namespace.
    fn clear(&self) -> Result<()>;
}

impl<V> Cache<V> for MemoryCache<V>
where
    V: Clone + Send + 'static,
{
    fn get(&self, key: &str) -> Result<V> {
        MemoryCache::get(self, key)
    }

    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        MemoryCache::set(self, key, value, ttl)
    }

    fn delete(&self, key: &str) -> Result<()> {
        MemoryCache::delete(self, key)
    }

    fn clear(&self) -> Result<()> {
        MemoryCache::clear(self)
    }
}
