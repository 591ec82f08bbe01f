//! The suggestion service.
//!
//! [`SuggestionService`] is the contract a session depends on.
//! [`PhrasebookService`] implements it with a translation resolver, an
//! augmentation table and a simulated backend delay.

use crate::augment::AugmentationTable;
use crate::config::SuggestionConfig;
use crate::context::ConversationContext;
use crate::error::{GenerationError, ResolveError};
use crate::intent::CanonicalIntent;
use crate::resolver::{TableResolver, TranslationResolver};
use crate::suggestion::Suggestion;
use async_trait::async_trait;
use rootcause::Report;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Trait for suggestion services.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    /// Generates reply suggestions for a conversation.
    ///
    /// The result is all or nothing: either every suggestion is returned, in
    /// intent order, or the call fails. The context is not validated here.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::GenerationFailed`] if the backend fails.
    async fn generate(
        &self,
        context: &ConversationContext,
    ) -> phrasebridge_core::Result<Vec<Suggestion>, GenerationError>;
}

/// Suggestion service built on a [`TranslationResolver`].
#[derive(Debug, Clone)]
pub struct PhrasebookService<R = TableResolver> {
    resolver: R,
    augmentations: AugmentationTable,
    latency: Duration,
}

impl PhrasebookService<TableResolver> {
    /// Creates a service with the built-in tables and no latency.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(TableResolver::builtin())
    }

    /// Creates a service from configuration, merging configured tables over
    /// the built-in ones.
    #[must_use]
    pub fn from_config(config: &SuggestionConfig) -> Self {
        let mut resolver = TableResolver::builtin();
        for (language, entries) in &config.translations {
            let mut table = Vec::with_capacity(entries.len());
            for (key, text) in entries {
                match key.parse::<CanonicalIntent>() {
                    Ok(intent) => table.push((intent, text.as_str())),
                    Err(error) => {
                        warn!(
                            language = language.as_str(),
                            %error,
                            "skipping configured translation"
                        );
                    }
                }
            }
            resolver = resolver.with_intents(language, table);
        }

        let mut augmentations = AugmentationTable::builtin();
        for (language, policy) in &config.augmentations {
            augmentations.insert(language, policy.clone());
        }

        Self::new(resolver)
            .with_augmentations(augmentations)
            .with_latency(config.latency())
    }
}

impl<R: TranslationResolver> PhrasebookService<R> {
    /// Creates a service around a resolver, with the built-in augmentations
    /// and no latency.
    #[must_use]
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            augmentations: AugmentationTable::builtin(),
            latency: Duration::ZERO,
        }
    }

    /// Replaces the augmentation table.
    #[must_use]
    pub fn with_augmentations(mut self, augmentations: AugmentationTable) -> Self {
        self.augmentations = augmentations;
        self
    }

    /// Sets the simulated latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Returns the resolver.
    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    async fn resolve(
        &self,
        intent: CanonicalIntent,
        language: &str,
    ) -> phrasebridge_core::Result<String, GenerationError> {
        match self.resolver.resolve(intent.phrase(), language).await {
            Ok(text) => Ok(text),
            Err(error) => {
                warn!(
                    %intent,
                    language,
                    %error,
                    resolver = self.resolver.name(),
                    "resolve failed"
                );
                Err(Report::<ResolveError>::from(error).context(
                    GenerationError::GenerationFailed {
                        intent,
                        language: language.to_string(),
                    },
                ))
            }
        }
    }
}

#[async_trait]
impl<R: TranslationResolver> SuggestionService for PhrasebookService<R> {
    #[instrument(
        skip(self, context),
        fields(
            user_language = %context.user_language,
            target_language = %context.target_language,
        )
    )]
    async fn generate(
        &self,
        context: &ConversationContext,
    ) -> phrasebridge_core::Result<Vec<Suggestion>, GenerationError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut suggestions = Vec::with_capacity(CanonicalIntent::ALL.len());
        for intent in CanonicalIntent::ALL {
            let source = self.resolve(intent, &context.user_language).await?;
            let translation = self.resolve(intent, &context.target_language).await?;
            suggestions.push(Suggestion::new(source, translation));
        }

        self.augmentations.apply(&context.target_language, &mut suggestions);

        debug!(count = suggestions.len(), "generated suggestions");
        Ok(suggestions)
    }
}
