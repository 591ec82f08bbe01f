//! Per-language augmentation policies.
//!
//! Some target languages get extra guidance on top of the translation: a
//! transliteration for each suggestion, or a cultural note on one of them.
//! Which languages get what is data in an [`AugmentationTable`].

use crate::resolver::language_key;
use crate::suggestion::Suggestion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A cultural note attached to one suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalNote {
    /// The note text.
    pub text: String,
    /// Position of the suggestion that carries the note.
    #[serde(default)]
    pub index: usize,
}

impl CulturalNote {
    /// Creates a note for the first suggestion.
    #[must_use]
    pub fn first(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            index: 0,
        }
    }
}

/// The augmentations enabled for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationPolicy {
    /// Transliterations by suggestion position.
    #[serde(default)]
    pub transliterations: Vec<String>,
    /// Optional cultural note.
    #[serde(default)]
    pub cultural_note: Option<CulturalNote>,
}

impl AugmentationPolicy {
    /// Creates a policy with transliterations only.
    #[must_use]
    pub fn transliterated<I, S>(transliterations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transliterations: transliterations.into_iter().map(Into::into).collect(),
            cultural_note: None,
        }
    }

    /// Adds a cultural note.
    #[must_use]
    pub fn with_cultural_note(mut self, note: CulturalNote) -> Self {
        self.cultural_note = Some(note);
        self
    }

    /// Applies the policy to suggestions in generation order.
    ///
    /// Positions without a transliteration, or a note index past the end,
    /// leave the suggestion untouched.
    pub fn apply(&self, suggestions: &mut [Suggestion]) {
        for (suggestion, transliteration) in suggestions.iter_mut().zip(&self.transliterations) {
            if !transliteration.is_empty() {
                suggestion.pinyin = Some(transliteration.clone());
            }
        }

        if let Some(note) = &self.cultural_note {
            if let Some(suggestion) = suggestions.get_mut(note.index) {
                suggestion.cultural_note = Some(note.text.clone());
            }
        }
    }
}

/// Augmentation policies keyed by language.
#[derive(Debug, Clone, Default)]
pub struct AugmentationTable {
    policies: HashMap<String, AugmentationPolicy>,
}

impl AugmentationTable {
    /// Creates a table with no policies.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table with the built-in policies for Chinese and Japanese.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with_policy(
                "chinese",
                AugmentationPolicy::transliterated([
                    "Xièxiè nín de xìnxī!",
                    "Nín kěyǐ zàicì jiěshì ma?",
                    "Wǒ míngbái. Nín yǒu shénme jiànyì?",
                ])
                .with_cultural_note(CulturalNote::first(
                    "In Chinese culture, expressing gratitude is important for maintaining harmony.",
                )),
            )
            .with_policy(
                "japanese",
                AugmentationPolicy::transliterated([
                    "Jōhō arigatō gozaimasu!",
                    "Mōichido setsumei shite itadakemasu ka?",
                    "Wakarimashita. Nani ka osusume wa arimasu ka?",
                ]),
            )
    }

    /// Sets the policy for a language, replacing any existing one.
    #[must_use]
    pub fn with_policy(mut self, language: &str, policy: AugmentationPolicy) -> Self {
        self.insert(language, policy);
        self
    }

    /// Sets the policy for a language, replacing any existing one.
    pub fn insert(&mut self, language: &str, policy: AugmentationPolicy) {
        self.policies.insert(language_key(language), policy);
    }

    /// Returns the policy for a language, matched case-insensitively.
    #[must_use]
    pub fn policy_for(&self, language: &str) -> Option<&AugmentationPolicy> {
        self.policies.get(&language_key(language))
    }

    /// Applies the language's policy, if any.
    pub fn apply(&self, language: &str, suggestions: &mut [Suggestion]) {
        if let Some(policy) = self.policy_for(language) {
            policy.apply(suggestions);
        }
    }
}
