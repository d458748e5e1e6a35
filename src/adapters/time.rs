//! Monotonic time adapter.
//!
//! Wraps `std::time::Instant`, counting from construction.  The scheduler
//! and the `server_uptime` parameter both read it through [`TimePort`].

use core::time::Duration;
use std::time::Instant;

use crate::app::ports::TimePort;

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

impl TimePort for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}
