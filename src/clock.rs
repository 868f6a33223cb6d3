//! Monotonic time abstraction
//!
//! Every cooldown and deferred phase in the engines compares a recorded
//! timestamp against a caller-supplied monotonic millisecond value, never
//! the wall clock, so simulated time in tests behaves exactly like real
//! time.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic milliseconds
pub type Millis = u64;

/// Source of monotonic time for the scheduling shells driving the engines
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Real monotonic clock, anchored at construction
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-advanced clock for deterministic tests
///
/// Clones share the same underlying counter, so one handle can advance time
/// while another is held by a driver.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}
