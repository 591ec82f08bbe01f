//! Configuration for the suggestion service.

use crate::augment::AugmentationPolicy;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Suggestion service configuration.
///
/// Translations and augmentations listed here are merged over the built-in
/// tables, so a language can be added or corrected without code changes.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    /// Simulated backend latency, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Extra translations: language -> intent identifier -> text.
    ///
    /// Intent identifiers are the snake_case names of
    /// [`CanonicalIntent`](crate::intent::CanonicalIntent) variants.
    #[serde(default)]
    pub translations: HashMap<String, HashMap<String, String>>,

    /// Extra augmentation policies by language.
    #[serde(default)]
    pub augmentations: HashMap<String, AugmentationPolicy>,
}

fn default_latency_ms() -> u64 {
    1200
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            translations: HashMap::new(),
            augmentations: HashMap::new(),
        }
    }
}

impl SuggestionConfig {
    /// Returns the simulated latency.
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
