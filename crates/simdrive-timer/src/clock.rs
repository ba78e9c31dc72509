//! Time sources

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// The monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying instant, so a loop can hand one handle
/// to each timer and advance them all at once. Used by replay runs, where
/// every frame lasts exactly one frame period.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    now: Rc<Cell<Instant>>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(origin: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(origin)),
        }
    }

    pub fn advance(&self, step: Duration) {
        let next = self
            .now
            .get()
            .checked_add(step)
            .unwrap_or_else(|| self.now.get());
        self.now.set(next);
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
