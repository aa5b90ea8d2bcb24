//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::Capacity;
use crate::error::Result;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries; zero or negative means unbounded
    pub capacity: i64,
    /// Reject a non-positive capacity instead of treating it as unbounded
    pub strict_capacity: bool,
    /// Background sweep interval in milliseconds; zero disables the sweep
    pub sweep_interval_ms: u64,
    /// Connection URL for the Redis backend
    pub redis_url: String,
    /// Connection URL for the Memcached backend
    pub memcached_url: String,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_STRICT_CAPACITY` - Reject non-positive capacity (default: false)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379/)
    /// - `MEMCACHED_URL` - Memcached URL (default: memcache://127.0.0.1:11211)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            strict_capacity: parse_var("CACHE_STRICT_CAPACITY")
                .unwrap_or(defaults.strict_capacity),
            sweep_interval_ms: parse_var("CACHE_SWEEP_INTERVAL_MS")
                .unwrap_or(defaults.sweep_interval_ms),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            memcached_url: env::var("MEMCACHED_URL").unwrap_or(defaults.memcached_url),
        }
    }

    /// Resolves the configured capacity according to `strict_capacity`.
    pub fn capacity(&self) -> Result<Capacity> {
        if self.strict_capacity {
            Capacity::strict(self.capacity)
        } else {
            Ok(Capacity::new(self.capacity))
        }
    }

    /// Returns the sweep interval, or None when the sweep is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_ms > 0).then(|| Duration::from_millis(self.sweep_interval_ms))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            strict_capacity: false,
            sweep_interval_ms: 1000,
            redis_url: "redis://127.0.0.1:6379/".to_string(),
            memcached_url: "memcache://127.0.0.1:11211".to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
