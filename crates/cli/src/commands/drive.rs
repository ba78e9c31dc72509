//! Interactive keyboard driving

use std::time::Duration;

use anyhow::Result;
use simdrive_console::StatusRenderer;
use simdrive_timer::MonotonicClock;

use crate::commands::{DriveArgs, StatusTarget};
use crate::config::DriveConfig;
use crate::error::CliError;
use crate::keyboard::{KeyboardPoll, RawModeGuard, poll_frame};
use crate::output;
use crate::session::DriveSession;

/// Execute drive command.
///
/// Runs until Esc / Ctrl-C or the frame limit. Each frame waits for key
/// events for whatever is left of the frame period after the previous
/// frame's work, and the vehicle advances by one full period per frame.
/// With `--json` the status line goes to stderr.
pub fn execute(args: &DriveArgs, mut config: DriveConfig, json: bool) -> Result<()> {
    args.frame_loop.apply_to(&mut config);
    config.validate()?;

    let period = config.frame_period();
    let renderer = StatusRenderer::new(
        StatusTarget::interactive(json).writer(),
        config.renderer,
    );
    tracing::info!(
        frame_rate_hz = config.frame_rate_hz,
        strategy = ?renderer.strategy(),
        "starting drive session"
    );
    let mut session = DriveSession::new(config, renderer, MonotonicClock);

    {
        let _raw_mode = RawModeGuard::enable()
            .map_err(|error| CliError::TerminalUnavailable(error.to_string()))?;
        let mut work_time = Duration::ZERO;

        while !session.is_finished() {
            let poll = poll_frame(period.saturating_sub(work_time))
                .map_err(|error| CliError::TerminalUnavailable(error.to_string()))?;
            let keys = match poll {
                KeyboardPoll::Keys(keys) => keys,
                KeyboardPoll::Quit => {
                    tracing::info!(
                        frames = session.frames(),
                        odometer_m = session.vehicle().odometer(),
                        "quit requested"
                    );
                    break;
                }
            };
            work_time = session.run_frame(&keys, period)?.work_time;
        }
    }

    let (summary, _status_out) = session.finish()?;
    output::print_summary(&summary, json);
    Ok(())
}
