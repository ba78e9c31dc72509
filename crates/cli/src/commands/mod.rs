//! Command implementations for simdrive CLI

pub mod drive;
pub mod replay;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use simdrive_console::RendererMode;
use simdrive_telemetry::StatusLayout;

use crate::config::DriveConfig;

/// Options shared by every command that runs the frame loop.
#[derive(Args, Debug, Clone, Default)]
pub struct LoopArgs {
    /// Frames per second (overrides the config file)
    #[arg(long, value_name = "HZ")]
    pub rate: Option<u32>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub max_frames: Option<u64>,

    /// Status line layout
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Status line padding strategy
    #[arg(long, value_enum)]
    pub renderer: Option<RendererArg>,
}

impl LoopArgs {
    /// Fold command-line overrides into `config`.
    pub fn apply_to(&self, config: &mut DriveConfig) {
        if let Some(rate) = self.rate {
            config.frame_rate_hz = rate;
        }
        if let Some(max_frames) = self.max_frames {
            config.max_frames = Some(max_frames);
        }
        if let Some(layout) = self.layout {
            config.status = layout.into();
        }
        if let Some(renderer) = self.renderer {
            config.renderer = renderer.into();
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    Compact,
    Full,
}

impl From<LayoutArg> for StatusLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Compact => StatusLayout::Compact,
            LayoutArg::Full => StatusLayout::Full,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererArg {
    Auto,
    WidthAware,
    Fallback,
}

impl From<RendererArg> for RendererMode {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::Auto => RendererMode::Auto,
            RendererArg::WidthAware => RendererMode::WidthAware,
            RendererArg::Fallback => RendererMode::Fallback,
        }
    }
}

/// Where the live status line is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTarget {
    Stdout,
    Stderr,
    Discard,
}

impl StatusTarget {
    /// With `--json` stdout carries only the summary document, so an
    /// interactive run moves its status line to stderr.
    pub fn interactive(json: bool) -> Self {
        if json { Self::Stderr } else { Self::Stdout }
    }

    /// With `--json` a replay's status lines are dropped.
    pub fn replay(json: bool) -> Self {
        if json { Self::Discard } else { Self::Stdout }
    }

    pub fn writer(self) -> Box<dyn Write> {
        match self {
            Self::Stdout => Box::new(io::stdout()),
            Self::Stderr => Box::new(io::stderr()),
            Self::Discard => Box::new(io::sink()),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DriveArgs {
    #[command(flatten)]
    pub frame_loop: LoopArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Replay script (YAML, or JSON by extension)
    pub script: PathBuf,

    #[command(flatten)]
    pub frame_loop: LoopArgs,
}
