//! Keyboard input mapping for SimDrive
//!
//! Turns a per-frame snapshot of pressed keys into a [`ControlCommand`] for
//! the simulated vehicle, carrying the reverse and autopilot toggles between
//! frames in a [`ToggleState`].

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod keys;
pub mod mapper;
pub mod types;

pub use keys::{Key, KeyState};
pub use mapper::{InputMapper, map_input};
pub use types::{ControlCommand, ToggleState};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),

    #[error("{axis} value {value} outside [{min}, {max}]")]
    OutOfRange {
        axis: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

pub type InputResult<T> = Result<T, InputError>;
