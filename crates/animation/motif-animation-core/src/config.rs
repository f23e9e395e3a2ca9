//! Controller configuration.

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;
use crate::Result;

/// Fade used by [`CrossFadeController::play_default`](crate::CrossFadeController::play_default).
pub const DEFAULT_FADE_SECONDS: f32 = 0.25;

fn default_fade() -> f32 {
    DEFAULT_FADE_SECONDS
}

fn default_output_name() -> String {
    "output".to_string()
}

/// Per-controller settings. Every field has a default, so `{}` is a valid JSON config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Cross-fade duration in seconds when the caller does not pass one.
    #[serde(default = "default_fade")]
    pub default_fade: f32,
    /// Name of the graph output feeding the target.
    #[serde(default = "default_output_name")]
    pub output_name: String,
    /// Restart both slot clocks on `resume()`. Off by default: a paused slot only plays again
    /// once a new clip is bound to it.
    #[serde(default)]
    pub resume_restarts_slots: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_fade: default_fade(),
            output_name: default_output_name(),
            resume_restarts_slots: false,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.default_fade.is_finite() || self.default_fade < 0.0 {
            return Err(PlaybackError::InvalidConfig {
                reason: format!("default_fade must be >= 0, got {}", self.default_fade),
            });
        }
        if self.output_name.is_empty() {
            return Err(PlaybackError::InvalidConfig {
                reason: "output_name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
