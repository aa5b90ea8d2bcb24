//! Async Operations
//!
//! Runs a cache write on Tokio's blocking pool and reports the outcome through a
//! one-shot channel. Only scheduling changes; the operation and its errors are
//! exactly those of the wrapped backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::backend::Cache;
use crate::error::{CacheError, Result};

/// Receiving end of a deferred cache operation. Receives exactly one value.
pub type Completion = oneshot::Receiver<Result<()>>;

/// Stores `value` under `key` on a background task.
///
/// The returned receiver may be dropped without waiting; the task still runs
/// to completion.
pub fn set_async<C, V>(
    cache: Arc<C>,
    key: impl Into<String>,
    value: V,
    ttl: Duration,
) -> Completion
where
    C: Cache<V> + ?Sized + 'static,
    V: Send + 'static,
{
    let key = key.into();
    run_blocking(move || cache.set(&key, value, ttl))
}

/// Removes `key` on a background task.
pub fn delete_async<C, V>(cache: Arc<C>, key: impl Into<String>) -> Completion
where
    C: Cache<V> + ?Sized + 'static,
    V: 'static,
{
    let key = key.into();
    run_blocking(move || cache.delete(&key))
}

/// Awaits a [`Completion`], folding a lost sender into `CacheError::Runtime`.
pub async fn wait(completion: Completion) -> Result<()> {
    completion.await.unwrap_or_else(|_| {
        Err(CacheError::Runtime(
            "cache task ended without reporting a result".to_string(),
        ))
    })
}

fn run_blocking<F>(op: F) -> Completion
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn_blocking(move || {
                // A dropped receiver is fine; the result is simply discarded
                let _ = tx.send(op());
            });
        }
        Err(err) => {
            let _ = tx.send(Err(CacheError::Runtime(err.to_string())));
        }
    }
    rx
}
