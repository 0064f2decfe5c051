//! Clock abstraction for the engine's deadlines
//!
//! The engine never sleeps. It records deadlines against a [`Clock`] and
//! settles them when the host calls [`Carousel::tick`](crate::Carousel::tick).
//! Production hosts use [`SystemClock`]; tests and the headless simulator
//! share a [`ManualClock`] and advance it explicitly.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Source of the current instant.
pub trait Clock: Send + Sync + 'static {
    /// Get the current instant.
    fn now(&self) -> Instant;

    /// Clone the clock into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Clock>;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn clone_box(&self) -> Box<dyn Clock> {
        Box::new(*self)
    }
}

/// Virtual clock that only moves when told to.
///
/// Clones share the same instant, so a test can hand one clone to the engine
/// and keep another to drive time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    instant: Arc<Mutex<Instant>>,
    base: Instant,
}

impl ManualClock {
    /// Create a clock frozen at the current wall instant.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            instant: Arc::new(Mutex::new(now)),
            base: now,
        }
    }

    /// Advance time by a duration.
    pub fn advance(&self, duration: Duration) {
        *self.instant.lock() += duration;
    }

    /// Advance by whole milliseconds.
    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Move time forward to `instant`. Earlier instants are ignored; the clock
    /// never runs backwards.
    pub fn advance_to(&self, instant: Instant) {
        let mut current = self.instant.lock();
        if instant > *current {
            *current = instant;
        }
    }

    /// Virtual time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.instant.lock().saturating_duration_since(self.base)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.instant.lock()
    }

    fn clone_box(&self) -> Box<dyn Clock> {
        Box::new(self.clone())
    }
}
