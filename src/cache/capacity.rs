//! Capacity Module
//!
//! Interprets the configured entry bound.

use std::num::NonZeroUsize;

use crate::error::{CacheError, Result};

// == Capacity ==
/// Maximum number of entries a store may hold.
///
/// A non-positive configured value means "unbounded" unless it is parsed with
/// [`Capacity::strict`], which rejects it instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// At most this many entries; inserting past it evicts the LRU entry
    Bounded(NonZeroUsize),
    /// No bound; nothing is ever evicted for space
    Unbounded,
}

impl Capacity {
    // == Lenient Constructor ==
    /// Non-positive values become `Unbounded`.
    pub fn new(raw: i64) -> Self {
        if raw <= 0 {
            return Capacity::Unbounded;
        }
        let limit = usize::try_from(raw).unwrap_or(usize::MAX);
        NonZeroUsize::new(limit).map_or(Capacity::Unbounded, Capacity::Bounded)
    }

    // == Strict Constructor ==
    /// Non-positive values are rejected with `CapacityMisconfigured`.
    pub fn strict(raw: i64) -> Result<Self> {
        match Self::new(raw) {
            Capacity::Unbounded => Err(CacheError::CapacityMisconfigured(raw)),
            bounded => Ok(bounded),
        }
    }

    /// Returns the entry limit, or None when unbounded.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Capacity::Bounded(limit) => Some(limit.get()),
            Capacity::Unbounded => None,
        }
    }
}

impl From<usize> for Capacity {
    /// Zero means unbounded.
    fn from(limit: usize) -> Self {
        NonZeroUsize::new(limit).map_or(Capacity::Unbounded, Capacity::Bounded)
    }
}
