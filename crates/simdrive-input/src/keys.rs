//! Driving keys and per-frame key snapshots

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InputError;

/// Keys the driving controls react to.
///
/// Arrow keys and WASD are interchangeable for steering and pedals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Key {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
    A = 4,
    D = 5,
    W = 6,
    S = 7,
    /// Hand brake.
    Space = 8,
    /// Reverse toggle.
    Q = 9,
    /// Autopilot toggle.
    P = 10,
    /// Vehicle reset.
    R = 11,
}

impl Key {
    pub const ALL: [Key; 12] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::A,
        Key::D,
        Key::W,
        Key::S,
        Key::Space,
        Key::Q,
        Key::P,
        Key::R,
    ];

    pub const STEER_LEFT: [Key; 2] = [Key::Left, Key::A];
    pub const STEER_RIGHT: [Key; 2] = [Key::Right, Key::D];
    pub const THROTTLE: [Key; 2] = [Key::Up, Key::W];
    pub const BRAKE: [Key; 2] = [Key::Down, Key::S];
    pub const HAND_BRAKE: Key = Key::Space;
    pub const REVERSE_TOGGLE: Key = Key::Q;
    pub const AUTOPILOT_TOGGLE: Key = Key::P;
    pub const RESET: Key = Key::R;

    const fn bit(self) -> u16 {
        1 << (self as u8)
    }

    /// Canonical token, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Key::Left => "left",
            Key::Right => "right",
            Key::Up => "up",
            Key::Down => "down",
            Key::A => "a",
            Key::D => "d",
            Key::W => "w",
            Key::S => "s",
            Key::Space => "space",
            Key::Q => "q",
            Key::P => "p",
            Key::R => "r",
        }
    }

    /// Map a typed character to a key, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Key::A),
            'd' => Some(Key::D),
            'w' => Some(Key::W),
            's' => Some(Key::S),
            ' ' => Some(Key::Space),
            'q' => Some(Key::Q),
            'p' => Some(Key::P),
            'r' => Some(Key::R),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = InputError;

    /// Accepts canonical names plus the role aliases `handbrake`, `reverse`,
    /// `autopilot` and `reset`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let key = match token.as_str() {
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "a" => Key::A,
            "d" => Key::D,
            "w" => Key::W,
            "s" => Key::S,
            "space" | "handbrake" => Key::Space,
            "q" | "reverse" => Key::Q,
            "p" | "autopilot" => Key::P,
            "r" | "reset" => Key::R,
            _ => return Err(InputError::UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}

/// Keys pressed during one frame.
///
/// A key that was never recorded reads as not pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyState {
    bits: u16,
}

impl KeyState {
    const VALID_BITS: u16 = (1 << Key::ALL.len()) - 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a raw bitmask, one bit per [`Key`] discriminant.
    /// Bits beyond the known keys are dropped.
    pub fn from_bits(bits: u16) -> Self {
        Self {
            bits: bits & Self::VALID_BITS,
        }
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    pub fn press(&mut self, key: Key) {
        self.bits |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.bits &= !key.bit();
    }

    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    pub fn any_pressed(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&key| self.is_pressed(key))
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn pressed(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|&key| self.is_pressed(key))
    }

    /// Parse a list of key tokens such as `["up", "space"]`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownKey`] for the first unrecognised token.
    pub fn parse_tokens<I, S>(tokens: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| token.as_ref().parse::<Key>())
            .collect()
    }
}

impl FromIterator<Key> for KeyState {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        let mut state = KeyState::new();
        for key in iter {
            state.press(key);
        }
        state
    }
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.pressed().map(Key::name).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
