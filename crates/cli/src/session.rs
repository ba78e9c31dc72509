//! One driving session: the per-frame loop body
//!
//! Each frame maps the pressed keys to a command, applies it (or the
//! autopilot's command) to the vehicle, reads the measurements back and
//! redraws the status line.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use simdrive_console::StatusRenderer;
use simdrive_input::{ControlCommand, KeyState, ToggleState, map_input};
use simdrive_telemetry::{PlayerMeasurements, StatusLine};
use simdrive_timer::{Clock, FrameTimer, StopWatch};

use crate::config::DriveConfig;
use crate::error::CliError;
use crate::vehicle::KinematicVehicle;

/// Length of the window the FPS figure is averaged over.
const FPS_WINDOW_SECONDS: f64 = 1.0;

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    /// Command sent to the vehicle, `None` when the frame reset it.
    pub applied: Option<ControlCommand>,
    pub toggles: ToggleState,
    pub measurements: PlayerMeasurements,
    pub status: String,
    /// Time spent inside the frame, excluding the caller's waiting.
    pub work_time: Duration,
}

/// Totals reported when a session ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub frames: u64,
    pub resets: u64,
    pub autopilot_frames: u64,
    pub offroad_frames: u64,
    pub max_speed_kmh: f64,
    pub final_speed_kmh: f64,
    pub distance_m: f64,
    pub reverse_engaged: bool,
    pub autopilot_engaged: bool,
}

pub struct DriveSession<W: Write, C: Clock + Clone> {
    config: DriveConfig,
    toggles: ToggleState,
    vehicle: KinematicVehicle,
    frame_timer: FrameTimer<C>,
    frame_watch: StopWatch<C>,
    renderer: StatusRenderer<W>,
    summary: SessionSummary,
}

impl<W: Write, C: Clock + Clone> DriveSession<W, C> {
    pub fn new(config: DriveConfig, renderer: StatusRenderer<W>, clock: C) -> Self {
        Self {
            config,
            toggles: ToggleState::default(),
            vehicle: KinematicVehicle::new(),
            frame_timer: FrameTimer::with_clock(clock.clone()),
            frame_watch: StopWatch::with_clock(clock),
            renderer,
            summary: SessionSummary::default(),
        }
    }

    pub fn vehicle(&self) -> &KinematicVehicle {
        &self.vehicle
    }

    pub fn frames(&self) -> u64 {
        self.frame_timer.step()
    }

    /// True once the configured frame limit has been reached.
    pub fn is_finished(&self) -> bool {
        self.config
            .max_frames
            .is_some_and(|limit| self.frame_timer.step() >= limit)
    }

    /// Run one frame with the keys pressed since the previous one.
    ///
    /// `dt` is the simulated time the vehicle advances by.
    ///
    /// # Errors
    ///
    /// Fails if the status line cannot be written.
    pub fn run_frame(&mut self, keys: &KeyState, dt: Duration) -> Result<FrameOutcome, CliError> {
        self.frame_watch.restart();

        let (command, toggles) = map_input(keys, self.toggles);
        if toggles != self.toggles {
            tracing::info!(
                reverse = toggles.reverse_engaged,
                autopilot = toggles.autopilot_engaged,
                "toggles changed"
            );
        }
        self.toggles = toggles;

        let applied = match command {
            None => {
                let position = self.vehicle.position();
                tracing::info!(
                    step = self.frame_timer.step(),
                    x = position.x,
                    y = position.y,
                    heading = self.vehicle.heading(),
                    "reset requested"
                );
                self.vehicle.reset();
                self.summary.resets += 1;
                None
            }
            Some(command) => {
                let command = if toggles.autopilot_engaged {
                    self.summary.autopilot_frames += 1;
                    self.vehicle.autopilot_command(&self.config.autopilot)
                } else {
                    command
                };
                self.vehicle.apply(&command, dt);
                Some(command)
            }
        };

        let measurements = self.vehicle.measurements();
        self.frame_timer.tick();
        let fps = self.frame_timer.ticks_per_second();
        if self.frame_timer.elapsed_seconds_since_lap() >= FPS_WINDOW_SECONDS {
            self.frame_timer.lap();
        }

        let status = StatusLine::for_layout(
            self.config.status,
            &measurements,
            Some(self.vehicle.map_context()),
            self.frame_timer.step(),
            fps,
        )
        .to_string();
        self.renderer.render_line(&status)?;
        self.record(&measurements);

        self.frame_watch.stop();
        let work_time = self.frame_watch.elapsed().unwrap_or_default();
        tracing::trace!(
            step = self.frame_timer.step(),
            ?applied,
            work_ms = self.frame_watch.elapsed_milliseconds().unwrap_or_default(),
            "frame done"
        );

        Ok(FrameOutcome {
            applied,
            toggles,
            measurements,
            status,
            work_time,
        })
    }

    fn record(&mut self, measurements: &PlayerMeasurements) {
        let speed = measurements.speed_kmh();
        self.summary.frames = self.frame_timer.step();
        self.summary.final_speed_kmh = speed;
        self.summary.max_speed_kmh = self.summary.max_speed_kmh.max(speed.abs());
        if measurements.intersection_offroad > 0.0 {
            self.summary.offroad_frames += 1;
        }
    }

    /// End the status line and return the session totals.
    ///
    /// # Errors
    ///
    /// Fails if the closing newline cannot be written.
    pub fn finish(mut self) -> Result<(SessionSummary, W), CliError> {
        self.renderer.finish()?;
        let mut summary = self.summary;
        summary.distance_m = f64::from(self.vehicle.odometer());
        summary.reverse_engaged = self.toggles.reverse_engaged;
        summary.autopilot_engaged = self.toggles.autopilot_engaged;
        Ok((summary, self.renderer.into_inner()))
    }
}
