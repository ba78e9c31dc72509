//! simdrive - keyboard driving loop with a live status line
//!
//! Maps held keys to control commands once per frame, drives a local
//! kinematic vehicle with them and keeps a one-line status readout updated
//! in place.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod config;
mod error;
mod keyboard;
mod output;
mod script;
mod session;
mod vehicle;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{DriveArgs, ReplayArgs};
use crate::config::DriveConfig;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "simdrive")]
#[command(about = "Drive a simulated car from the keyboard with a live status line")]
#[command(version)]
#[command(long_about = "
simdrive reads the keyboard once per frame, turns the held keys into a
steering / throttle / brake command and drives a local vehicle with it.
Speed and lane statistics are shown on a single status line that is
rewritten in place.

Keys: arrows or WASD to drive, Space for the hand brake, Q toggles reverse,
P toggles the autopilot, R resets the vehicle. Esc or Ctrl-C quits.

Use --json for a machine-readable session summary.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Drive configuration file (YAML, or JSON by extension)
    #[arg(long, global = true, env = "SIMDRIVE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive interactively from the keyboard
    Drive(DriveArgs),

    /// Drive from a recorded key script without a terminal
    Replay(ReplayArgs),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so they never interleave with the status line.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("simdrive={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Drive(args) => commands::drive::execute(args, load_config(cli)?, cli.json),
        Commands::Replay(args) => commands::replay::execute(args, load_config(cli)?, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<DriveConfig> {
    match &cli.config {
        Some(path) => DriveConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(DriveConfig::default()),
    }
}
