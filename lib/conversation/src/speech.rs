//! Speech playback of suggestions.
//!
//! The platform speech engine sits behind [`SpeechSynthesizer`]. This module
//! only decides what to say and with which locale.

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use phrasebridge_suggest::{Suggestion, language_key};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Locale used for any language missing from [`LOCALES`].
pub const DEFAULT_LOCALE: &str = "en-US";

const LOCALES: &[(&str, &str)] = &[
    ("english", "en-US"),
    ("spanish", "es-ES"),
    ("french", "fr-FR"),
    ("german", "de-DE"),
    ("italian", "it-IT"),
    ("japanese", "ja-JP"),
    ("korean", "ko-KR"),
    ("chinese", "zh-CN"),
];

/// Maps a free-text language name to a voice locale, case-insensitively.
///
/// Unknown names map to [`DEFAULT_LOCALE`].
#[must_use]
pub fn locale_for(language: &str) -> &'static str {
    let key = language_key(language);
    LOCALES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(DEFAULT_LOCALE, |(_, locale)| *locale)
}

/// Which text of a suggestion to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionField {
    /// The reply in the user's language.
    Source,
    /// The reply in the target language.
    Translation,
}

impl SuggestionField {
    /// Returns the field's text.
    #[must_use]
    pub fn text(self, suggestion: &Suggestion) -> &str {
        match self {
            Self::Source => &suggestion.source,
            Self::Translation => &suggestion.translation,
        }
    }
}

impl fmt::Display for SuggestionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Translation => f.write_str("translation"),
        }
    }
}

/// A request to speak some text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Text to speak.
    pub text: String,
    /// Voice locale, e.g. "es-ES".
    pub locale: String,
    /// Voice pitch multiplier.
    pub pitch: f32,
    /// Speaking rate multiplier.
    pub rate: f32,
}

impl Utterance {
    /// Creates an utterance in the locale of `language`.
    #[must_use]
    pub fn new(text: impl Into<String>, language: &str, speech: &SpeechConfig) -> Self {
        Self {
            text: text.into(),
            locale: locale_for(language).to_string(),
            pitch: speech.pitch,
            rate: speech.rate,
        }
    }
}

/// Trait for platform speech capabilities.
///
/// Playback is fire-and-forget: `speak` returns once the utterance has been
/// handed to the platform.
pub trait SpeechSynthesizer: Send + Sync {
    /// Plays an utterance.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform cannot play the utterance.
    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;
}
