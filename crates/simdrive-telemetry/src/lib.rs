//! Player telemetry and status-line text for SimDrive.
//!
//! - `measurements` - what the simulator reports back about the player vehicle
//! - `status` - the one-line `Step N (FPS): ...` summary shown while driving

#![deny(clippy::unwrap_used)]

pub mod measurements;
pub mod status;

pub use measurements::{MapContext, PlayerMeasurements, Vector2};
pub use status::{StatusLayout, StatusLine, format_status, format_status_with_map};

/// Metres per second to kilometres per hour.
pub const MPS_TO_KMH: f64 = 3.6;
