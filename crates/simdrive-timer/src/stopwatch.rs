//! Single-interval stopwatch

use std::time::{Duration, Instant};

use crate::{Clock, MILLIS_PER_SECOND, MonotonicClock, TimerError, TimerResult};

/// Measures the interval between `restart()` and `stop()`.
///
/// Reading the elapsed time before `stop()` has been called since the last
/// restart is an error rather than a guess.
#[derive(Debug, Clone)]
pub struct StopWatch<C: Clock = MonotonicClock> {
    clock: C,
    start: Instant,
    end: Option<Instant>,
}

impl StopWatch<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for StopWatch<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StopWatch<C> {
    /// Create a stopwatch that starts immediately on `clock`.
    pub fn with_clock(clock: C) -> Self {
        let start = clock.now();
        Self {
            clock,
            start,
            end: None,
        }
    }

    pub fn restart(&mut self) {
        self.start = self.clock.now();
        self.end = None;
    }

    pub fn stop(&mut self) {
        self.end = Some(self.clock.now());
    }

    pub fn is_stopped(&self) -> bool {
        self.end.is_some()
    }

    /// Interval between the last restart and the last stop.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::NotStopped`] if `stop()` has not been called
    /// since the last restart.
    pub fn elapsed(&self) -> TimerResult<Duration> {
        let end = self.end.ok_or(TimerError::NotStopped)?;
        Ok(end.saturating_duration_since(self.start))
    }

    /// # Errors
    ///
    /// Returns [`TimerError::NotStopped`] if the stopwatch is still running.
    pub fn elapsed_seconds(&self) -> TimerResult<f64> {
        Ok(self.elapsed()?.as_secs_f64())
    }

    /// # Errors
    ///
    /// Returns [`TimerError::NotStopped`] if the stopwatch is still running.
    pub fn elapsed_milliseconds(&self) -> TimerResult<f64> {
        Ok(MILLIS_PER_SECOND * self.elapsed_seconds()?)
    }
}
