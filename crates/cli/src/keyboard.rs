//! Terminal keyboard polling
//!
//! Terminals report key presses as events rather than as a held-key table,
//! so a frame's [`KeyState`] is every driving key whose press (or auto-repeat)
//! arrived during that frame.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use simdrive_input::{Key, KeyState};

/// Result of polling the keyboard for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardPoll {
    Keys(KeyState),
    Quit,
}

/// Raw mode for the lifetime of the guard.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// # Errors
    ///
    /// Fails if the terminal cannot be switched to raw mode, e.g. when stdin
    /// is not a terminal.
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(error) = terminal::disable_raw_mode() {
            tracing::warn!(%error, "failed to restore terminal mode");
        }
    }
}

/// Driving key for a terminal key code.
pub fn key_for_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(c) => Key::from_char(c),
        _ => None,
    }
}

pub fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Fold one terminal event into the frame's key state.
///
/// Returns `true` when the event asks to quit.
pub fn apply_event(keys: &mut KeyState, event: &Event) -> bool {
    let Event::Key(key_event) = event else {
        return false;
    };
    if key_event.kind == KeyEventKind::Release {
        return false;
    }
    if is_quit(key_event) {
        return true;
    }
    if let Some(key) = key_for_code(key_event.code) {
        keys.press(key);
    }
    false
}

/// Collect key events for up to `window`.
///
/// # Errors
///
/// Fails if the terminal event stream cannot be read.
pub fn poll_frame(window: Duration) -> io::Result<KeyboardPoll> {
    let deadline = Instant::now()
        .checked_add(window)
        .unwrap_or_else(Instant::now);
    let mut keys = KeyState::new();

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || !event::poll(remaining)? {
            return Ok(KeyboardPoll::Keys(keys));
        }
        if apply_event(&mut keys, &event::read()?) {
            return Ok(KeyboardPoll::Quit);
        }
    }
}
