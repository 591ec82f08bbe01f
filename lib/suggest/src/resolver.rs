//! Translation resolver abstraction.
//!
//! A resolver turns a canonical phrase into text in a given language. The
//! built-in [`TableResolver`] answers from lookup tables; a resolver backed
//! by a translation service implements the same trait.

use crate::error::ResolveError;
use crate::intent::CanonicalIntent;
use async_trait::async_trait;
use std::collections::HashMap;

/// Language the canonical phrases are written in.
pub const CANONICAL_LANGUAGE: &str = "english";

/// Built-in translations, one entry per language in [`CanonicalIntent::ALL`] order.
const BUILTIN_TRANSLATIONS: &[(&str, [&str; 3])] = &[
    (
        "spanish",
        [
            "¡Gracias por la información!",
            "¿Podría explicar eso de nuevo, por favor?",
            "Entiendo. ¿Qué me recomienda?",
        ],
    ),
    (
        "french",
        [
            "Merci pour l'information !",
            "Pourriez-vous expliquer cela à nouveau, s'il vous plaît ?",
            "Je comprends. Que recommanderiez-vous ?",
        ],
    ),
    (
        "german",
        [
            "Vielen Dank für die Information!",
            "Könnten Sie das bitte noch einmal erklären?",
            "Ich verstehe. Was würden Sie empfehlen?",
        ],
    ),
    (
        "italian",
        [
            "Grazie per l'informazione!",
            "Potresti spiegarlo di nuovo, per favore?",
            "Capisco. Cosa mi consiglieresti?",
        ],
    ),
    (
        "japanese",
        [
            "情報をありがとうございます！",
            "もう一度説明していただけますか？",
            "わかりました。何かおすすめはありますか？",
        ],
    ),
    (
        "chinese",
        ["谢谢您的信息！", "您可以再次解释吗？", "我明白。您有什么建议？"],
    ),
    (
        "korean",
        [
            "정보 감사합니다!",
            "다시 설명해 주시겠어요?",
            "이해했습니다. 무엇을 추천하시겠어요?",
        ],
    ),
];

/// Normalizes a free-text language name into a lookup key.
#[must_use]
pub fn language_key(language: &str) -> String {
    language.to_lowercase()
}

/// Returns the in-band marker for a phrase with no translation.
#[must_use]
pub fn unavailable_translation(language: &str) -> String {
    format!("[Translation to {} not available]", language_key(language))
}

/// Returns true if `text` is the marker produced by [`unavailable_translation`].
#[must_use]
pub fn is_unavailable(text: &str) -> bool {
    text.starts_with("[Translation to ") && text.ends_with(" not available]")
}

/// Trait for translation resolvers.
///
/// A missing translation is not an error: implementations return
/// [`unavailable_translation`] for it. Errors are reserved for the backend
/// itself failing.
#[async_trait]
pub trait TranslationResolver: Send + Sync {
    /// Resolves `phrase` into `language`, matching the language case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or answers with
    /// something unusable.
    async fn resolve(&self, phrase: &str, language: &str) -> Result<String, ResolveError>;

    /// Returns a short name identifying the backend.
    fn name(&self) -> &str;
}

/// A resolver answering from in-memory lookup tables.
///
/// The built-in tables include [`CANONICAL_LANGUAGE`], mapping each phrase
/// to itself.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    tables: HashMap<String, HashMap<String, String>>,
}

impl TableResolver {
    /// Creates a resolver with no tables.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a resolver with the built-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        let canonical = Self::empty().with_intents(
            CANONICAL_LANGUAGE,
            CanonicalIntent::ALL.map(|intent| (intent, intent.phrase())),
        );
        BUILTIN_TRANSLATIONS
            .iter()
            .fold(canonical, |resolver, (language, phrases)| {
                resolver.with_intents(
                    *language,
                    CanonicalIntent::ALL
                        .into_iter()
                        .zip(phrases.iter().copied()),
                )
            })
    }

    /// Adds translations keyed by canonical phrase, overriding existing entries.
    #[must_use]
    pub fn with_table<P, T>(
        mut self,
        language: &str,
        entries: impl IntoIterator<Item = (P, T)>,
    ) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        let table = self.tables.entry(language_key(language)).or_default();
        table.extend(
            entries
                .into_iter()
                .map(|(phrase, text)| (phrase.into(), text.into())),
        );
        self
    }

    /// Adds translations keyed by intent, overriding existing entries.
    #[must_use]
    pub fn with_intents<T>(
        self,
        language: &str,
        entries: impl IntoIterator<Item = (CanonicalIntent, T)>,
    ) -> Self
    where
        T: Into<String>,
    {
        self.with_table(
            language,
            entries
                .into_iter()
                .map(|(intent, text)| (intent.phrase(), text)),
        )
    }

    /// Returns true if a table exists for the language.
    #[must_use]
    pub fn knows(&self, language: &str) -> bool {
        self.tables.contains_key(&language_key(language))
    }

    /// Returns the languages with a table, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Looks up a phrase synchronously.
    #[must_use]
    pub fn lookup(&self, phrase: &str, language: &str) -> String {
        self.tables
            .get(&language_key(language))
            .and_then(|table| table.get(phrase))
            .cloned()
            .unwrap_or_else(|| unavailable_translation(language))
    }
}

#[async_trait]
impl TranslationResolver for TableResolver {
    async fn resolve(&self, phrase: &str, language: &str) -> Result<String, ResolveError> {
        Ok(self.lookup(phrase, language))
    }

    fn name(&self) -> &str {
        "table"
    }
}
