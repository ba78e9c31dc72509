//! Vehicle control and toggle types

use serde::{Deserialize, Serialize};

use crate::{InputError, InputResult};

/// Control values sent to the vehicle for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlCommand {
    /// -1.0 (full left) to 1.0 (full right).
    pub steer: f32,
    /// 0.0 to 1.0.
    pub throttle: f32,
    /// 0.0 to 1.0.
    pub brake: f32,
    pub hand_brake: bool,
    pub reverse: bool,
}

impl ControlCommand {
    pub const STEER_RANGE: (f32, f32) = (-1.0, 1.0);
    pub const PEDAL_RANGE: (f32, f32) = (0.0, 1.0);

    pub fn new() -> Self {
        Self::default()
    }

    /// Check every axis is finite and within its range.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::OutOfRange`] naming the first offending axis.
    pub fn validate(&self) -> InputResult<()> {
        check_axis("steer", self.steer, Self::STEER_RANGE)?;
        check_axis("throttle", self.throttle, Self::PEDAL_RANGE)?;
        check_axis("brake", self.brake, Self::PEDAL_RANGE)?;
        Ok(())
    }

    /// Copy with every axis forced into range. Non-finite values become 0.
    pub fn clamped(&self) -> Self {
        Self {
            steer: clamp_axis(self.steer, Self::STEER_RANGE),
            throttle: clamp_axis(self.throttle, Self::PEDAL_RANGE),
            brake: clamp_axis(self.brake, Self::PEDAL_RANGE),
            hand_brake: self.hand_brake,
            reverse: self.reverse,
        }
    }
}

fn check_axis(axis: &'static str, value: f32, (min, max): (f32, f32)) -> InputResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            axis,
            value,
            min,
            max,
        })
    }
}

fn clamp_axis(value: f32, (min, max): (f32, f32)) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        0.0
    }
}

/// Toggles carried by the caller from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToggleState {
    pub reverse_engaged: bool,
    pub autopilot_engaged: bool,
}

impl ToggleState {
    pub fn new(reverse_engaged: bool, autopilot_engaged: bool) -> Self {
        Self {
            reverse_engaged,
            autopilot_engaged,
        }
    }
}
