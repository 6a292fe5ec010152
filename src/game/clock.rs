//! Time sources for the game loop.
//!
//! The core never reads the wall clock itself; it is handed a monotonic timestamp once per
//! update. Timestamps are `Duration`s since an arbitrary, fixed epoch.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::constants::FLASH_PERIOD;

/// A monotonic time source.
pub trait Clock {
    /// The current timestamp. Never decreases between calls.
    fn now(&self) -> Duration;
}

/// Real time, measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to, for tests and headless runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jumps forward to `to`. Earlier timestamps are ignored so the clock stays monotonic.
    pub fn set(&self, to: Duration) {
        if to > self.now.get() {
            self.now.set(to);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Whether blinking UI elements are visible at `now`: on for one period, off for the next.
pub fn flash_visible(now: Duration) -> bool {
    (now.as_millis() / FLASH_PERIOD.as_millis()) % 2 == 0
}
