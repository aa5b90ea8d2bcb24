//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod capacity;
mod entry;
pub mod expiry;
mod lru;
mod memory;
mod stats;
mod store;


// Re-export public types
pub use capacity::Capacity;
pub use entry::CacheEntry;
pub use lru::RecencyList;
pub use memory::{MemoryCache, SharedStore};
pub use stats::CacheStats;
pub use store::CacheStore;
