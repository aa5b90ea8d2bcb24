//! lrukv - an in-process key/value cache
//!
//! Provides an LRU-bounded store with per-entry TTL expiration, an optional
//! background expiry sweep, and Redis/Memcached adapters sharing the same
//! [`Cache`] contract.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod remote;
pub mod tasks;

pub use backend::Cache;
pub use cache::{Capacity, MemoryCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
