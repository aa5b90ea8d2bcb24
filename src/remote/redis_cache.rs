//! Redis Backend
//!
//! Forwards the cache contract to a Redis server over a single synchronous
//! connection.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Duration;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::backend::Cache;
use crate::error::{CacheError, Result};
use crate::remote::codec;

/// Cache backed by a Redis database.
///
/// `clear` issues `FLUSHDB`, so point it at a database the cache owns.
pub struct RedisCache<V> {
    conn: Mutex<::redis::Connection>,
    _value: PhantomData<fn() -> V>,
}

impl<V> RedisCache<V> {
    /// Connects to `url` (e.g. `redis://127.0.0.1:6379/`) and checks the
    /// server answers `PING`.
    pub fn open(url: &str) -> Result<Self> {
        let client = ::redis::Client::open(url)?;
        let mut conn = client.get_connection()?;
        let _: String = ::redis::cmd("PING").query(&mut conn)?;
        info!(url, "connected to redis");

        Ok(Self {
            conn: Mutex::new(conn),
            _value: PhantomData,
        })
    }
}

impl<V> Cache<V> for RedisCache<V>
where
    V: Serialize + DeserializeOwned + Debug,
{
    fn get(&self, key: &str) -> Result<V> {
        let mut conn = self.conn.lock();
        let data: Option<Vec<u8>> = ::redis::cmd("GET").arg(key).query(&mut *conn)?;
        match data {
            Some(bytes) => codec::decode(&bytes),
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        let data = codec::encode(&value);
        let mut cmd = ::redis::cmd("SET");
        cmd.arg(key).arg(data.as_slice());
        if let Some(secs) = codec::ttl_secs(ttl) {
            cmd.arg("EX").arg(secs);
        }

        let mut conn = self.conn.lock();
        cmd.query::<()>(&mut *conn)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.lock();
        let removed: u64 = ::redis::cmd("DEL").arg(key).query(&mut *conn)?;
        if removed == 0 {
            return Err(CacheError::NotFound(key.to_string()));
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut conn = self.conn.lock();
        ::redis::cmd("FLUSHDB").query::<()>(&mut *conn)?;
        Ok(())
    }
}
