//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type shared by every cache backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not present, or present but expired. The two causes are not distinguished.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// A strict capacity was requested with a non-positive bound
    #[error("Capacity must be positive, got {0}")]
    CapacityMisconfigured(i64),

    /// A stored payload could not be decoded into the requested value type
    #[error("Encoding failure: {0}")]
    Encoding(String),

    /// Transport or protocol failure talking to a remote backend
    #[error("Backend failure: {0}")]
    Backend(String),

    /// Missing async runtime, or a background task failed to report back
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CacheError {
    /// Returns true for the absent-or-expired outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

#[cfg(feature = "memcached")]
impl From<memcache::MemcacheError> for CacheError {
    fn from(err: memcache::MemcacheError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
