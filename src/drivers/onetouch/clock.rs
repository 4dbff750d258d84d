use std::{
    cell::Cell,
    time::{Duration, Instant},
};

use super::REPORT_RATE_HZ;

/// Source of monotonic timestamps for touch sessions
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin
    fn now(&self) -> Duration;
}

/// [Clock] backed by the system monotonic clock
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic [Clock] that advances by a fixed step every time it is read.
/// Used for replaying captures and in tests.
#[derive(Debug)]
pub struct FixedStepClock {
    next: Cell<Duration>,
    step: Duration,
}

impl FixedStepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            next: Cell::new(Duration::ZERO),
            step,
        }
    }
}

impl Default for FixedStepClock {
    /// Steps at the panel report rate
    fn default() -> Self {
        Self::new(Duration::from_secs(1) / REPORT_RATE_HZ)
    }
}

impl Clock for FixedStepClock {
    fn now(&self) -> Duration {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}
