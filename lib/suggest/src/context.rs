//! Conversation context: the input to a generation call.
//!
//! A context lives in memory for one session and is never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default language of the user.
pub const DEFAULT_USER_LANGUAGE: &str = "English";

/// Default language of the other party.
pub const DEFAULT_TARGET_LANGUAGE: &str = "Spanish";

/// One of the four message fields a request requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextField {
    /// The user's original message.
    UserMessage,
    /// The translation of the user's message.
    UserTranslation,
    /// The other party's response.
    ResponseMessage,
    /// The translation of the other party's response.
    ResponseTranslation,
}

impl fmt::Display for ContextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserMessage => "user_message",
            Self::UserTranslation => "user_translation",
            Self::ResponseMessage => "response_message",
            Self::ResponseTranslation => "response_translation",
        };
        f.write_str(name)
    }
}

/// A bilingual conversation snippet.
///
/// Language names are free text. They are matched case-insensitively by
/// resolvers and the locale table, never validated against a fixed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationContext {
    /// Language the user writes in.
    pub user_language: String,
    /// Language of the other party.
    pub target_language: String,
    /// The user's original message.
    pub user_message: String,
    /// The user's message translated into the target language.
    pub user_translation: String,
    /// The other party's response, in the target language.
    pub response_message: String,
    /// The response translated into the user's language.
    pub response_translation: String,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(DEFAULT_USER_LANGUAGE, DEFAULT_TARGET_LANGUAGE)
    }
}

impl ConversationContext {
    /// Creates an empty context for a language pair.
    #[must_use]
    pub fn new(user_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            user_language: user_language.into(),
            target_language: target_language.into(),
            user_message: String::new(),
            user_translation: String::new(),
            response_message: String::new(),
            response_translation: String::new(),
        }
    }

    /// Sets the user's message and its translation.
    #[must_use]
    pub fn with_user_message(
        mut self,
        message: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        self.user_message = message.into();
        self.user_translation = translation.into();
        self
    }

    /// Sets the other party's response and its translation.
    #[must_use]
    pub fn with_response(
        mut self,
        message: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        self.response_message = message.into();
        self.response_translation = translation.into();
        self
    }

    /// Returns the value of a message field.
    #[must_use]
    pub fn field(&self, field: ContextField) -> &str {
        match field {
            ContextField::UserMessage => &self.user_message,
            ContextField::UserTranslation => &self.user_translation,
            ContextField::ResponseMessage => &self.response_message,
            ContextField::ResponseTranslation => &self.response_translation,
        }
    }

    /// Returns the message fields that are still empty, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<ContextField> {
        [
            ContextField::UserMessage,
            ContextField::UserTranslation,
            ContextField::ResponseMessage,
            ContextField::ResponseTranslation,
        ]
        .into_iter()
        .filter(|field| self.field(*field).is_empty())
        .collect()
    }

    /// Returns true if all four message fields are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Clears the message fields, keeping the language pair.
    pub fn clear_messages(&mut self) {
        self.user_message.clear();
        self.user_translation.clear();
        self.response_message.clear();
        self.response_translation.clear();
    }
}
