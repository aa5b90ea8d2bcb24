//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, plus the
//! handle used to stop it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::SharedStore;
use crate::error::{CacheError, Result};

// == Sweep Handle ==
/// Owner-side handle of a running sweep task.
///
/// Stopping is one-shot: the first [`stop`](SweepHandle::stop) wakes the task,
/// later calls do nothing. Dropping the handle stops the task as well.
#[derive(Debug)]
pub struct SweepHandle {
    stopped: AtomicBool,
    signal: Arc<Notify>,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the task to exit. Returns false if it was already signalled.
    pub fn stop(&self) -> bool {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return false;
        }
        // notify_one stores a permit, so a task busy sweeping still sees it
        self.signal.notify_one();
        true
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns a background task that removes expired entries every `interval`.
///
/// The task takes the store lock once per tick and never holds it across an
/// await point. It must be spawned from inside a Tokio runtime.
///
/// # Returns
/// A [`SweepHandle`] used to stop the task, or `CacheError::Runtime` when no
/// runtime is available or the interval is zero.
pub fn spawn_sweeper<V>(store: SharedStore<V>, interval: Duration) -> Result<SweepHandle>
where
    V: Clone + Send + 'static,
{
    if interval.is_zero() {
        return Err(CacheError::Runtime(
            "sweep interval must be positive".to_string(),
        ));
    }
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|err| CacheError::Runtime(err.to_string()))?;

    let signal = Arc::new(Notify::new());
    let stop_signal = Arc::clone(&signal);

    let task = runtime.spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting expiry sweep");

        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = stop_signal.notified() => break,
                _ = ticker.tick() => {
                    let removed = store.lock().purge_expired();
                    if removed > 0 {
                        info!(removed, "expiry sweep removed entries");
                    } else {
                        debug!("expiry sweep found nothing to remove");
                    }
                }
            }
        }

        info!("expiry sweep stopped");
    });

    Ok(SweepHandle {
        stopped: AtomicBool::new(false),
        signal,
        task,
    })
}
