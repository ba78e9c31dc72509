//! Scripted, non-interactive driving

use std::io::Write;

use anyhow::{Context, Result};
use simdrive_console::{RendererMode, StatusRenderer};
use simdrive_timer::SimulatedClock;

use crate::commands::{ReplayArgs, StatusTarget};
use crate::config::DriveConfig;
use crate::output;
use crate::script::ReplayScript;
use crate::session::{DriveSession, SessionSummary};

/// Execute replay command.
pub fn execute(args: &ReplayArgs, mut config: DriveConfig, json: bool) -> Result<()> {
    let script = ReplayScript::load(&args.script)
        .with_context(|| format!("failed to load replay script {}", args.script.display()))?;

    if let Some(rate) = script.frame_rate_hz {
        config.frame_rate_hz = rate;
    }
    args.frame_loop.apply_to(&mut config);
    if config.renderer == RendererMode::Auto {
        config.renderer = RendererMode::Fallback;
    }
    config.validate()?;

    let summary = run(&script, config, StatusTarget::replay(json).writer())?;
    output::print_summary(&summary, json);
    Ok(())
}

/// Drive `script` on a simulated clock, one frame period per frame, so the
/// status lines and totals are the same on every run.
///
/// # Errors
///
/// Fails on an invalid script or if the status line cannot be written.
pub fn run<W: Write>(script: &ReplayScript, config: DriveConfig, out: W) -> Result<SessionSummary> {
    let frames = script.key_frames()?;
    let period = config.frame_period();
    let clock = SimulatedClock::new();
    let renderer = StatusRenderer::new(out, config.renderer);

    tracing::info!(
        frames = script.total_frames(),
        frame_rate_hz = config.frame_rate_hz,
        "starting replay"
    );
    let mut session = DriveSession::new(config, renderer, clock.clone());
    for keys in frames {
        if session.is_finished() {
            break;
        }
        clock.advance(period);
        let outcome = session.run_frame(&keys, period)?;
        tracing::debug!(
            step = session.frames(),
            applied = ?outcome.applied,
            reverse = outcome.toggles.reverse_engaged,
            autopilot = outcome.toggles.autopilot_engaged,
            offroad = outcome.measurements.intersection_offroad,
            status = %outcome.status,
            "replayed frame"
        );
    }

    let (summary, _out) = session.finish()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic_in_result_fn)]

    use super::*;
    use crate::script::ScriptFrame;
    use std::io;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn script(frames: &[(&[&str], u32)]) -> ReplayScript {
        ReplayScript {
            frame_rate_hz: None,
            frames: frames
                .iter()
                .map(|(keys, repeat)| ScriptFrame {
                    keys: keys.iter().map(ToString::to_string).collect(),
                    repeat: *repeat,
                })
                .collect(),
        }
    }

    fn fallback_config() -> DriveConfig {
        DriveConfig {
            renderer: RendererMode::Fallback,
            ..DriveConfig::default()
        }
    }

    #[test]
    fn test_replay_is_deterministic() -> TestResult {
        let script = script(&[(&["up"], 30), (&["up", "right"], 10), (&["space"], 5)]);
        let first = run(&script, fallback_config(), Vec::new())?;
        let second = run(&script, fallback_config(), Vec::new())?;
        assert_eq!(first, second);
        assert_eq!(first.frames, 45);
        Ok(())
    }

    #[test]
    fn test_replay_output_reports_rate() -> TestResult {
        let script = script(&[(&[], 2)]);
        let mut out = Vec::new();
        run(&script, fallback_config(), &mut out)?;
        let text = String::from_utf8(out)?;
        assert!(text.starts_with("\rStep 1 (30.0 FPS): 0.00 km/h, 0% other lane, 0% off-road"));
        assert!(text.contains("\rStep 2 (30.0 FPS): "));
        assert!(text.ends_with('\n'));
        Ok(())
    }

    #[test]
    fn test_replay_respects_frame_limit() -> TestResult {
        let script = script(&[(&["w"], 100)]);
        let config = DriveConfig {
            max_frames: Some(7),
            ..fallback_config()
        };
        let summary = run(&script, config, io::sink())?;
        assert_eq!(summary.frames, 7);
        Ok(())
    }

    #[test]
    fn test_frame_limit_stops_huge_script() -> TestResult {
        let script = script(&[(&["up"], u32::MAX), (&["down"], u32::MAX)]);
        let config = DriveConfig {
            max_frames: Some(1),
            ..fallback_config()
        };
        let summary = run(&script, config, io::sink())?;
        assert_eq!(summary.frames, 1);
        Ok(())
    }

    #[test]
    fn test_replay_reset_and_toggles() -> TestResult {
        let script = script(&[
            (&["up"], 10),
            (&["reset"], 1),
            (&["reverse"], 1),
            (&["autopilot"], 1),
        ]);
        let summary = run(&script, fallback_config(), io::sink())?;
        assert_eq!(summary.resets, 1);
        assert!(summary.reverse_engaged);
        assert!(summary.autopilot_engaged);
        Ok(())
    }
}
