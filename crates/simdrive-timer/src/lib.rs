//! Wall-clock timers for the SimDrive frame loop.
//!
//! Two timers live here:
//!
//! - [`StopWatch`] measures a single interval between `restart()` and `stop()`.
//! - [`FrameTimer`] counts frames and reports the tick rate since the last lap,
//!   which is what the status line shows as FPS.
//!
//! Both read time through the [`Clock`] trait so a loop can run against the
//! monotonic system clock or a [`SimulatedClock`] that advances in fixed steps.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod clock;
pub mod frame;
pub mod stopwatch;

pub use clock::{Clock, MonotonicClock, SimulatedClock};
pub use frame::FrameTimer;
pub use stopwatch::StopWatch;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    #[error("Stopwatch read before stop(): no end instant recorded since last restart")]
    NotStopped,
}

pub type TimerResult<T> = Result<T, TimerError>;

/// Milliseconds per second, used for the millisecond accessors.
pub const MILLIS_PER_SECOND: f64 = 1000.0;
