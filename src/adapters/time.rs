//! Host time adapter.
//!
//! Monotonic millisecond clock backed by `std::time::Instant`, measured
//! from adapter construction.  Cheap to clone; clones share the same
//! epoch so the keyboard thread and the control loop agree on time.

use std::time::Instant;

use crate::app::ports::ClockPort;

#[derive(Debug, Clone, Copy)]
pub struct HostClock {
    start: Instant,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for HostClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
