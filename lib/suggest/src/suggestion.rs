//! Suggested replies.

use serde::{Deserialize, Serialize};

/// A suggested reply with its translation.
///
/// `pinyin` and `cultural_note` are only present when the target language's
/// augmentation policy supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The reply in the user's language.
    pub source: String,
    /// The same reply in the target language.
    pub translation: String,
    /// Phonetic rendering of the translation in Latin script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    /// Pragmatic or cultural advice about the reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_note: Option<String>,
}

impl Suggestion {
    /// Creates a suggestion without augmentations.
    #[must_use]
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
            pinyin: None,
            cultural_note: None,
        }
    }

    /// Adds a transliteration.
    #[must_use]
    pub fn with_pinyin(mut self, pinyin: impl Into<String>) -> Self {
        self.pinyin = Some(pinyin.into());
        self
    }

    /// Adds a cultural note.
    #[must_use]
    pub fn with_cultural_note(mut self, note: impl Into<String>) -> Self {
        self.cultural_note = Some(note.into());
        self
    }

    /// Returns true if any augmentation is attached.
    #[must_use]
    pub fn is_augmented(&self) -> bool {
        self.pinyin.is_some() || self.cultural_note.is_some()
    }
}
