//! Key snapshot to control command mapping

use crate::{ControlCommand, Key, KeyState, ToggleState};

/// Map one frame of pressed keys to a vehicle command.
///
/// Returns `None` when the reset key is held: the caller should reset the
/// vehicle instead of driving it, and the toggles come back untouched.
///
/// Otherwise keys combine freely. Right steering is applied after left, so
/// holding both steers right. A held toggle key flips its toggle on every
/// call, not only on the press edge. `reverse` on the returned command always
/// mirrors the updated reverse toggle.
pub fn map_input(keys: &KeyState, toggles: ToggleState) -> (Option<ControlCommand>, ToggleState) {
    if keys.is_pressed(Key::RESET) {
        return (None, toggles);
    }

    let mut command = ControlCommand::new();
    let mut next = toggles;

    if keys.any_pressed(&Key::STEER_LEFT) {
        command.steer = -1.0;
    }
    if keys.any_pressed(&Key::STEER_RIGHT) {
        command.steer = 1.0;
    }
    if keys.any_pressed(&Key::THROTTLE) {
        command.throttle = 1.0;
    }
    if keys.any_pressed(&Key::BRAKE) {
        command.brake = 1.0;
    }
    if keys.is_pressed(Key::HAND_BRAKE) {
        command.hand_brake = true;
    }
    if keys.is_pressed(Key::REVERSE_TOGGLE) {
        next.reverse_engaged = !next.reverse_engaged;
    }
    if keys.is_pressed(Key::AUTOPILOT_TOGGLE) {
        next.autopilot_engaged = !next.autopilot_engaged;
    }
    command.reverse = next.reverse_engaged;

    (Some(command), next)
}

/// Owns the toggles for callers that don't want to thread them through.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper {
    toggles: ToggleState,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toggles(toggles: ToggleState) -> Self {
        Self { toggles }
    }

    pub fn toggles(&self) -> ToggleState {
        self.toggles
    }

    pub fn apply(&mut self, keys: &KeyState) -> Option<ControlCommand> {
        let (command, toggles) = map_input(keys, self.toggles);
        self.toggles = toggles;
        command
    }
}
