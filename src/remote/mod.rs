//! Remote Backends
//!
//! Adapters forwarding the [`Cache`](crate::Cache) contract to an external
//! key/value service. Values travel as JSON; TTLs as whole seconds.

pub mod codec;
#[cfg(feature = "memcached")]
mod memcached_cache;
#[cfg(feature = "redis")]
mod redis_cache;

#[cfg(feature = "memcached")]
pub use memcached_cache::MemcachedCache;
#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;
