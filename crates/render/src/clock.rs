//! Time sources for the render loop.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    /// Time since an arbitrary fixed origin. Never decreases.
    fn now(&self) -> Duration;
}

/// Wall-clock time from [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
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
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Simulated time, advanced explicitly.
///
/// Clones share the same reading, so a caller can keep a handle while the
/// render loop owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Negative and NaN inputs count as zero. Values too large for a
    /// [`Duration`] leave the clock where it is.
    pub fn advance_secs(&self, secs: f32) {
        match Duration::try_from_secs_f32(secs.max(0.0)) {
            Ok(by) => self.advance(by),
            Err(e) => tracing::warn!(secs, "ignoring clock advance: {e}"),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
