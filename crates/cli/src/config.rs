//! Drive loop configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use simdrive_console::RendererMode;
use simdrive_telemetry::StatusLayout;

use crate::error::CliError;

pub const DEFAULT_FRAME_RATE_HZ: u32 = 30;
pub const MAX_FRAME_RATE_HZ: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriveConfig {
    pub frame_rate_hz: u32,
    pub max_frames: Option<u64>,
    pub status: StatusLayout,
    pub renderer: RendererMode,
    pub autopilot: AutopilotConfig,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
            max_frames: None,
            status: StatusLayout::Compact,
            renderer: RendererMode::Auto,
            autopilot: AutopilotConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutopilotConfig {
    /// Throttle the autopilot holds below its cruise speed.
    pub cruise_throttle: f32,
    /// Speed the autopilot holds, in km/h.
    pub cruise_speed_kmh: f32,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            cruise_throttle: 0.5,
            cruise_speed_kmh: 30.0,
        }
    }
}

impl DriveConfig {
    /// Load from a `.json` file, or YAML for any other extension.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, does not parse, or does not
    /// validate.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)?;
        let config = if is_json(path) {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        tracing::debug!(path = %path.display(), ?config, "loaded drive config");
        Ok(config)
    }

    /// # Errors
    ///
    /// Fails on malformed YAML or invalid values.
    pub fn from_yaml_str(text: &str) -> Result<Self, CliError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Fails on malformed JSON or invalid values.
    pub fn from_json_str(text: &str) -> Result<Self, CliError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfiguration`] naming the bad field.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.frame_rate_hz == 0 || self.frame_rate_hz > MAX_FRAME_RATE_HZ {
            return Err(CliError::InvalidConfiguration(format!(
                "frame_rate_hz must be between 1 and {MAX_FRAME_RATE_HZ}, got {}",
                self.frame_rate_hz
            )));
        }
        let throttle = self.autopilot.cruise_throttle;
        if !(0.0..=1.0).contains(&throttle) {
            return Err(CliError::InvalidConfiguration(format!(
                "autopilot.cruise_throttle must be within [0, 1], got {throttle}"
            )));
        }
        let speed = self.autopilot.cruise_speed_kmh;
        if !speed.is_finite() || speed < 0.0 {
            return Err(CliError::InvalidConfiguration(format!(
                "autopilot.cruise_speed_kmh must be a non-negative number, got {speed}"
            )));
        }
        Ok(())
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate_hz.max(1)))
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
