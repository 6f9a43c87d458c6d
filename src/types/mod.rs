//! Core data types for the alarm settings surface.
//!
//! The settings themselves are owned by an external settings collaborator;
//! this crate only consumes them read-only. [`AlarmConfig`] mirrors that
//! surface: whether the audible alarm plays at all, an optional custom clip
//! path, and the loop duration with its 1–30 second bound.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shortest allowed alarm duration in seconds.
pub const MIN_DURATION_SECONDS: u32 = 1;

/// Longest allowed alarm duration in seconds.
pub const MAX_DURATION_SECONDS: u32 = 30;

fn default_sound_enabled() -> bool {
    true
}

fn default_duration_seconds() -> u32 {
    10
}

/// Read-only alarm settings.
///
/// # Example
///
/// ```
/// use timerbell::types::AlarmConfig;
///
/// let config = AlarmConfig::default();
/// assert!(config.sound_enabled);
/// assert_eq!(config.duration_seconds, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmConfig {
    /// Whether the audible alarm plays at all.
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,

    /// Full path to a clip file overriding the library lookup.
    #[serde(default)]
    pub custom_clip_path: Option<PathBuf>,

    /// How long the alarm loops, in seconds (1-30).
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            sound_enabled: default_sound_enabled(),
            custom_clip_path: None,
            duration_seconds: default_duration_seconds(),
        }
    }
}

impl AlarmConfig {
    /// Sets the alarm duration in seconds.
    #[must_use]
    pub fn with_duration_seconds(mut self, seconds: u32) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Enables or disables the audible alarm.
    #[must_use]
    pub fn with_sound_enabled(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Sets the custom clip path override.
    #[must_use]
    pub fn with_custom_clip_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_clip_path = Some(path.into());
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.duration_seconds < MIN_DURATION_SECONDS
            || self.duration_seconds > MAX_DURATION_SECONDS
        {
            return Err("アラーム時間は1-30秒の範囲で指定してください".to_string());
        }
        Ok(())
    }

    /// Returns the loop duration clamped into the allowed range.
    #[must_use]
    pub fn clamped_duration(&self) -> Duration {
        Duration::from_secs(u64::from(
            self.duration_seconds
                .clamp(MIN_DURATION_SECONDS, MAX_DURATION_SECONDS),
        ))
    }

    /// Returns the clip identifier to request: the custom override when
    /// set, otherwise `fallback`.
    #[must_use]
    pub fn clip_identifier(&self, fallback: &str) -> String {
        match &self.custom_clip_path {
            Some(path) => path.to_string_lossy().into_owned(),
            None => fallback.to_string(),
        }
    }
}
