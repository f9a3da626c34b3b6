//! Session time.
//!
//! Transition deadlines are wall-clock timestamps so they can be shown to a
//! front end, but they are waited on with the tokio timer. [`MonotonicClock`]
//! keeps both on one timeline.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::Instant;

/// Source of "now" for transition deadlines.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Time left until `deadline`, zero once it has passed.
    fn remaining_until(&self, deadline: DateTime<Utc>) -> Duration {
        (deadline - self.now()).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Wall-clock anchor advanced by tokio's monotonic `Instant`.
///
/// Under a paused test runtime the clock only moves when tokio time does, so
/// a sleep for [`Clock::remaining_until`] always lands on the deadline.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    wall_anchor: DateTime<Utc>,
    anchor: Instant,
}

impl MonotonicClock {
    /// Anchors the clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wall_anchor: Utc::now(),
            anchor: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> DateTime<Utc> {
        self.wall_anchor + TimeDelta::from_std(self.anchor.elapsed()).unwrap_or_default()
    }
}
