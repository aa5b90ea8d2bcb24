//! Memcached Backend
//!
//! Forwards the cache contract to one or more Memcached servers.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::backend::Cache;
use crate::error::{CacheError, Result};
use crate::remote::codec;

/// Memcached reads expirations longer than this as absolute Unix timestamps.
const MAX_RELATIVE_EXPIRATION: u64 = 60 * 60 * 24 * 30;

/// Cache backed by Memcached.
///
/// `clear` issues `flush_all`, which empties the whole server.
pub struct MemcachedCache<V> {
    client: memcache::Client,
    _value: PhantomData<fn() -> V>,
}

impl<V> MemcachedCache<V> {
    /// Connects to `url` (e.g. `memcache://127.0.0.1:11211`) and checks the
    /// server answers `version`.
    pub fn open(url: &str) -> Result<Self> {
        let client = memcache::connect(url)?;
        client.version()?;
        info!(url, "connected to memcached");

        Ok(Self {
            client,
            _value: PhantomData,
        })
    }
}

/// Converts a TTL into a memcached expiration field (0 = never).
fn expiration(ttl: Duration) -> u32 {
    let Some(secs) = codec::ttl_secs(ttl) else {
        return 0;
    };
    let field = if secs > MAX_RELATIVE_EXPIRATION {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|since| since.as_secs())
            .unwrap_or(0);
        now.saturating_add(secs)
    } else {
        secs
    };
    u32::try_from(field).unwrap_or(u32::MAX)
}

impl<V> Cache<V> for MemcachedCache<V>
where
    V: Serialize + DeserializeOwned + Debug,
{
    fn get(&self, key: &str) -> Result<V> {
        let data: Option<Vec<u8>> = self.client.get(key)?;
        match data {
            Some(bytes) => codec::decode(&bytes),
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        let data = codec::encode(&value);
        self.client.set(key, data.as_slice(), expiration(ttl))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        if self.client.delete(key)? {
            Ok(())
        } else {
            Err(CacheError::NotFound(key.to_string()))
        }
    }

    fn clear(&self) -> Result<()> {
        self.client.flush()?;
        Ok(())
    }
}
