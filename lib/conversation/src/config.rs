//! Session configuration.

use serde::Deserialize;
use std::time::Duration;

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// How long a suggestion request may stay pending, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Voice settings for suggestion playback.
    #[serde(default)]
    pub speech: SpeechConfig,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            speech: SpeechConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Returns the request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Voice settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeechConfig {
    /// Pitch multiplier.
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// Speaking rate multiplier. Slightly slow helps learners follow along.
    #[serde(default = "default_rate")]
    pub rate: f32,
}

fn default_pitch() -> f32 {
    1.0
}

fn default_rate() -> f32 {
    0.9
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            pitch: default_pitch(),
            rate: default_rate(),
        }
    }
}
