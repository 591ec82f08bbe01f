//! Reply suggestion generation for phrasebridge.
//!
//! Given a [`ConversationContext`], a [`SuggestionService`] produces an
//! ordered list of [`Suggestion`]s: one per [`CanonicalIntent`], each
//! resolved into the user's language and the target language.
//!
//! Two seams keep the service swappable:
//!
//! - **Translation Resolver**: the [`TranslationResolver`] strategy maps a
//!   canonical phrase and a language to text. [`TableResolver`] is the
//!   built-in lookup-table implementation.
//! - **Augmentation policy**: an [`AugmentationTable`] maps a language to
//!   its transliterations and cultural note, so new languages are data,
//!   not branches.

pub mod augment;
pub mod config;
pub mod context;
pub mod error;
pub mod intent;
pub mod resolver;
pub mod service;
pub mod suggestion;

pub use augment::{AugmentationPolicy, AugmentationTable, CulturalNote};
pub use config::SuggestionConfig;
pub use context::{ContextField, ConversationContext};
pub use error::{GenerationError, ResolveError};
pub use intent::{CanonicalIntent, UnknownIntent};
pub use resolver::{
    TableResolver, TranslationResolver, is_unavailable, language_key, unavailable_translation,
};
pub use service::{PhrasebookService, SuggestionService};
pub use suggestion::Suggestion;
