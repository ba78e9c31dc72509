//! Frame counter and tick-rate timer

use std::time::Instant;

use crate::{Clock, MonotonicClock};

/// Counts frames and reports how many were ticked per second since the last
/// lap.
///
/// The loop calls [`tick`](Self::tick) once per frame and
/// [`lap`](Self::lap) whenever it wants the rate window to restart.
#[derive(Debug, Clone)]
pub struct FrameTimer<C: Clock = MonotonicClock> {
    clock: C,
    step: u64,
    lap_step: u64,
    lap_time: Instant,
}

impl FrameTimer<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for FrameTimer<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FrameTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        let lap_time = clock.now();
        Self {
            clock,
            step: 0,
            lap_step: 0,
            lap_time,
        }
    }

    /// Frames ticked since construction.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn tick(&mut self) {
        self.step = self.step.saturating_add(1);
    }

    pub fn lap(&mut self) {
        self.lap_step = self.step;
        self.lap_time = self.clock.now();
    }

    pub fn elapsed_seconds_since_lap(&self) -> f64 {
        self.clock
            .now()
            .saturating_duration_since(self.lap_time)
            .as_secs_f64()
    }

    /// Frames per second over the current lap window.
    ///
    /// An empty time window reports `0.0`.
    pub fn ticks_per_second(&self) -> f64 {
        let elapsed = self.elapsed_seconds_since_lap();
        if elapsed > 0.0 {
            self.step.saturating_sub(self.lap_step) as f64 / elapsed
        } else {
            0.0
        }
    }
}
