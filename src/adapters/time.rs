//! Host time adapter.
//!
//! Monotonic time for mode timeouts, backed by `std::time::Instant`.

use core::time::Duration;
use std::time::Instant;

use crate::app::ports::ClockPort;

/// Monotonic clock measuring from its own construction.
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}
