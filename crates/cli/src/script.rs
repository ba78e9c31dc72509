//! Replay scripts
//!
//! A script lists frames of pressed keys, optionally repeated:
//!
//! ```yaml
//! frame_rate_hz: 20
//! frames:
//!   - keys: [up]
//!     repeat: 40
//!   - keys: [up, left]
//!     repeat: 5
//!   - keys: [reset]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use simdrive_input::KeyState;

use crate::config::is_json;
use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    /// Overrides the configured frame rate for this script.
    #[serde(default)]
    pub frame_rate_hz: Option<u32>,
    pub frames: Vec<ScriptFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptFrame {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

impl ReplayScript {
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)?;
        if is_json(path) {
            Ok(serde_json::from_str(&text)?)
        } else {
            Ok(serde_yaml::from_str(&text)?)
        }
    }

    /// Resolve key tokens into one [`KeyState`] per frame, repeats expanded
    /// lazily so a long script costs nothing until it is driven.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidScript`] for unknown keys, zero repeats or
    /// an empty script.
    pub fn key_frames(&self) -> Result<impl Iterator<Item = KeyState> + use<>, CliError> {
        if self.frames.is_empty() {
            return Err(CliError::InvalidScript("script has no frames".into()));
        }

        let mut resolved = Vec::with_capacity(self.frames.len());
        for (index, frame) in self.frames.iter().enumerate() {
            if frame.repeat == 0 {
                return Err(CliError::InvalidScript(format!(
                    "frame {index}: repeat must be at least 1"
                )));
            }
            let keys = KeyState::parse_tokens(&frame.keys)
                .map_err(|error| CliError::InvalidScript(format!("frame {index}: {error}")))?;
            let repeat = usize::try_from(frame.repeat).unwrap_or(usize::MAX);
            resolved.push((keys, repeat));
        }
        Ok(resolved
            .into_iter()
            .flat_map(|(keys, repeat)| std::iter::repeat_n(keys, repeat)))
    }

    /// Number of frames the script drives, repeats included.
    pub fn total_frames(&self) -> u64 {
        self.frames
            .iter()
            .map(|frame| u64::from(frame.repeat))
            .sum()
    }
}
