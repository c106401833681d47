//! Monotonic call id sequence

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared, strictly increasing source of call ids
#[derive(Debug)]
pub struct CallSequence {
    next: AtomicU64,
}

impl CallSequence {
    /// Start the sequence at `start`
    pub fn new(start: u64) -> Self {
        Self { next: AtomicU64::new(start) }
    }

    /// Start the sequence at the unix timestamp of `instant`
    pub fn from_time(instant: DateTime<Utc>) -> Self {
        Self::new(u64::try_from(instant.timestamp()).unwrap_or(0))
    }

    /// Take the next call id
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Id the next call will receive
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}
