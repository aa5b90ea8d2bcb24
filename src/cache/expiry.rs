//! Expiry Policy Module
//!
//! Pure functions deciding when an entry stops being live.

use std::time::{Duration, Instant};

// == Deadline ==
/// Computes the absolute expiry instant for a TTL measured from `now`.
///
/// A zero TTL means the entry never expires. A TTL too large to be
/// represented as an `Instant` is treated the same way.
pub fn deadline(now: Instant, ttl: Duration) -> Option<Instant> {
    if ttl.is_zero() {
        None
    } else {
        now.checked_add(ttl)
    }
}

// == Is Expired ==
/// Returns true once `now` has reached the deadline.
///
/// Boundary condition: an entry whose deadline equals `now` is already expired.
pub fn is_expired(deadline: Option<Instant>, now: Instant) -> bool {
    match deadline {
        Some(at) => at <= now,
        None => false,
    }
}
