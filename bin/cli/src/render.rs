//! Rendering suggestions for the terminal.

use phrasebridge_conversation::Session;
use phrasebridge_suggest::{ContextField, Suggestion};
use serde::Serialize;
use std::fmt::Write;

/// JSON document printed with `--json`.
#[derive(Debug, Serialize)]
pub struct SuggestionsDocument<'a> {
    /// Language of the suggestion sources.
    pub user_language: &'a str,
    /// Language of the suggestion translations.
    pub target_language: &'a str,
    /// The suggestions, in generation order.
    pub suggestions: &'a [Suggestion],
}

impl<'a> SuggestionsDocument<'a> {
    /// Captures the session's languages and suggestions.
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            user_language: &session.context.user_language,
            target_language: &session.context.target_language,
            suggestions: session.suggestions(),
        }
    }
}

/// Renders the session's suggestions as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json(session: &Session) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SuggestionsDocument::new(session))
}

/// Renders the session's suggestions as plain text.
#[must_use]
pub fn text(session: &Session) -> String {
    let mut out = format!("Suggested Replies\n{}\n", session.heading());
    for (index, suggestion) in session.suggestions().iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {}\n   {}\n",
            index + 1,
            suggestion.source,
            suggestion.translation
        );
        if let Some(pinyin) = &suggestion.pinyin {
            let _ = writeln!(out, "   {pinyin}");
        }
        if let Some(note) = &suggestion.cultural_note {
            let _ = writeln!(out, "   Note: {note}");
        }
    }
    out
}

/// Renders the message shown when required fields are empty.
#[must_use]
pub fn missing_fields(missing: &[ContextField]) -> String {
    let flags: Vec<String> = missing
        .iter()
        .map(|field| format!("--{}", field.to_string().replace('_', "-")))
        .collect();
    format!("All four message fields are required. Missing: {}", flags.join(", "))
}
