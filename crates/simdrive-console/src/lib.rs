//! Same-line status rendering for SimDrive
//!
//! Each call to [`StatusRenderer::render_line`] rewinds to the start of the
//! current terminal line and overwrites it, padding with spaces so nothing
//! from the previous, longer line is left behind. The terminal never scrolls
//! while a run is in progress.
//!
//! Two strategies exist:
//!
//! - width-aware: pads to the terminal's column count
//! - fallback: pads to the longest line rendered so far
//!
//! The strategy is picked once, when the renderer is built.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod renderer;
pub mod shared;
pub mod width;

pub use renderer::{RenderStrategy, RendererMode, StatusRenderer, padded_line};
pub use shared::SharedStatusRenderer;
pub use width::{CrosstermWidth, FixedWidth, TerminalWidth, UnknownWidth};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Terminal write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Column count assumed when the terminal cannot report its width.
pub const DEFAULT_COLUMNS: u16 = 80;
