//! Background Tasks Module
//!
//! Contains the work the cache schedules off the caller's thread.
//!
//! # Tasks
//! - Expiry sweep: removes expired entries at a fixed interval
//! - Completions: runs a cache write on a blocking task and reports back once

mod completion;
mod sweep;

pub use completion::{delete_async, set_async, wait, Completion};
pub use sweep::{spawn_sweeper, SweepHandle};
