//! Conversation session.
//!
//! A session owns the context being edited and the suggestions from the
//! last successful request. Requests move it between two states:
//!
//! - `Idle` -> `Pending` when a complete context is submitted
//! - `Pending` -> `Idle` on completion, failure, timeout or cancellation,
//!   including dropping the future returned by `request_suggestions`
//!
//! Only one request can be pending. A completion for any other request is
//! stale and leaves the session untouched.

use crate::config::SessionConfig;
use crate::error::{SessionError, SpeechError};
use crate::speech::{SpeechSynthesizer, SuggestionField, Utterance};
use chrono::{DateTime, Utc};
use phrasebridge_core::{ConversationSessionId, SuggestionRequestId};
use phrasebridge_suggest::{
    ContextField, ConversationContext, GenerationError, Suggestion, SuggestionService,
};
use rootcause::Report;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Notice shown to the user when a request fails.
pub const FAILURE_NOTICE: &str = "Couldn't generate reply suggestions. Please try again.";

/// The request state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SessionState {
    /// No request in flight.
    Idle,
    /// Waiting for the suggestion service.
    Pending { request_id: SuggestionRequestId },
}

impl SessionState {
    /// Returns true if a request is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Returns true if a new request may be issued.
    #[must_use]
    pub fn can_request(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// A request that has been issued but not completed.
///
/// Holds a snapshot of the context so that edits made while pending do not
/// leak into the in-flight call.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    /// Identifies the request.
    pub request_id: SuggestionRequestId,
    /// The context as it was when the request was issued.
    pub context: ConversationContext,
}

/// The result of [`Session::request_suggestions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Suggestions were replaced.
    Completed {
        request_id: SuggestionRequestId,
        count: usize,
    },
    /// The context is missing required fields; the service was not called.
    Incomplete { missing: Vec<ContextField> },
}

/// A conversation session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier.
    pub id: ConversationSessionId,
    /// The context being edited.
    pub context: ConversationContext,
    state: SessionState,
    suggestions: Vec<Suggestion>,
    failure_notice: Option<String>,
    config: SessionConfig,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When suggestions were last replaced.
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Creates an idle session with the default language pair.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            id: ConversationSessionId::new(),
            context: ConversationContext::default(),
            state: SessionState::Idle,
            suggestions: Vec::new(),
            failure_notice: None,
            config,
            created_at: Utc::now(),
            last_completed_at: None,
        }
    }

    /// Replaces the context.
    #[must_use]
    pub fn with_context(mut self, context: ConversationContext) -> Self {
        self.context = context;
        self
    }

    /// Returns the request state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the suggestions from the last successful request.
    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Returns the notice for the last failed request, if it has not been
    /// superseded.
    #[must_use]
    pub fn failure_notice(&self) -> Option<&str> {
        self.failure_notice.as_deref()
    }

    /// Returns the heading shown above the suggestions.
    #[must_use]
    pub fn heading(&self) -> String {
        format!(
            "From {} to {}",
            self.context.user_language, self.context.target_language
        )
    }

    /// Moves the session from `Idle` to `Pending`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyPending`] if a request is in flight,
    /// or [`SessionError::ValidationIncomplete`] if a message field is empty.
    pub fn begin_request(&mut self) -> phrasebridge_core::Result<PendingRequest, SessionError> {
        if let SessionState::Pending { request_id } = self.state {
            return Err(SessionError::AlreadyPending { request_id }.into());
        }

        let missing = self.context.missing_fields();
        if !missing.is_empty() {
            return Err(SessionError::ValidationIncomplete { missing }.into());
        }

        let request_id = SuggestionRequestId::new();
        self.state = SessionState::Pending { request_id };
        self.failure_notice = None;
        debug!(session_id = %self.id, %request_id, "request pending");

        Ok(PendingRequest {
            request_id,
            context: self.context.clone(),
        })
    }

    /// Applies the result of a pending request and returns to `Idle`.
    ///
    /// On success the suggestions are replaced and their count returned. On
    /// failure the previous suggestions are kept and a failure notice is set.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StaleCompletion`] if `request_id` is not the
    /// pending request; the session is left as it was. Returns
    /// [`SessionError::GenerationFailed`] wrapping the service error if
    /// `result` is an error.
    pub fn complete(
        &mut self,
        request_id: SuggestionRequestId,
        result: phrasebridge_core::Result<Vec<Suggestion>, GenerationError>,
    ) -> phrasebridge_core::Result<usize, SessionError> {
        match self.state {
            SessionState::Pending { request_id: pending } if pending == request_id => {}
            _ => {
                debug!(session_id = %self.id, %request_id, "discarding stale completion");
                return Err(SessionError::StaleCompletion { request_id }.into());
            }
        }

        self.state = SessionState::Idle;
        match result {
            Ok(suggestions) => {
                let count = suggestions.len();
                self.suggestions = suggestions;
                self.failure_notice = None;
                self.last_completed_at = Some(Utc::now());
                info!(session_id = %self.id, %request_id, count, "suggestions updated");
                Ok(count)
            }
            Err(report) => {
                warn!(session_id = %self.id, %request_id, "suggestion request failed");
                self.failure_notice = Some(FAILURE_NOTICE.to_string());
                Err(report.context(SessionError::GenerationFailed { request_id }))
            }
        }
    }

    /// Abandons the pending request, if any, and returns its ID.
    ///
    /// A later completion for it is treated as stale.
    pub fn cancel(&mut self) -> Option<SuggestionRequestId> {
        match self.state {
            SessionState::Pending { request_id } => {
                self.state = SessionState::Idle;
                debug!(session_id = %self.id, %request_id, "request cancelled");
                Some(request_id)
            }
            SessionState::Idle => None,
        }
    }

    /// Requests suggestions for the current context.
    ///
    /// An incomplete context is reported as [`RequestOutcome::Incomplete`]
    /// without calling the service. Otherwise the call runs under the
    /// configured timeout. Dropping the returned future abandons the
    /// request and leaves the session `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyPending`] if a request is in flight,
    /// even when the context has since become incomplete, and
    /// [`SessionError::GenerationFailed`] if the service fails or times out.
    #[instrument(skip(self, service), fields(session_id = %self.id))]
    pub async fn request_suggestions<S>(
        &mut self,
        service: &S,
    ) -> phrasebridge_core::Result<RequestOutcome, SessionError>
    where
        S: SuggestionService + ?Sized,
    {
        if let SessionState::Pending { request_id } = self.state {
            return Err(SessionError::AlreadyPending { request_id }.into());
        }

        let missing = self.context.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "context incomplete, not requesting");
            return Ok(RequestOutcome::Incomplete { missing });
        }

        let pending = self.begin_request()?;
        let timeout = self.config.request_timeout();
        let after_ms = self.config.request_timeout_ms;
        let mut guard = PendingGuard {
            session: self,
            request_id: pending.request_id,
        };

        let result = match tokio::time::timeout(timeout, service.generate(&pending.context)).await
        {
            Ok(result) => result,
            Err(_) => Err(GenerationError::TimedOut { after_ms }.into()),
        };

        let count = guard.session.complete(pending.request_id, result)?;
        Ok(RequestOutcome::Completed {
            request_id: pending.request_id,
            count,
        })
    }

    /// Plays one field of a suggestion.
    ///
    /// The source is spoken with the user's language locale, the translation
    /// with the target language locale.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SuggestionOutOfRange`] for a bad index, or
    /// [`SessionError::SpeechFailed`] wrapping the synthesizer error.
    pub fn speak<T>(
        &self,
        index: usize,
        field: SuggestionField,
        synthesizer: &T,
    ) -> phrasebridge_core::Result<Utterance, SessionError>
    where
        T: SpeechSynthesizer + ?Sized,
    {
        let suggestion =
            self.suggestions
                .get(index)
                .ok_or_else(|| SessionError::SuggestionOutOfRange {
                    index,
                    len: self.suggestions.len(),
                })?;

        let language = match field {
            SuggestionField::Source => &self.context.user_language,
            SuggestionField::Translation => &self.context.target_language,
        };
        let utterance = Utterance::new(field.text(suggestion), language, &self.config.speech);

        synthesizer.speak(&utterance).map_err(|error| {
            Report::<SpeechError>::from(error).context(SessionError::SpeechFailed { index, field })
        })?;

        Ok(utterance)
    }

    /// Clears the context, suggestions and failure notice.
    ///
    /// A pending request is cancelled; its completion will be stale.
    pub fn reset(&mut self) {
        self.cancel();
        self.context = ConversationContext::default();
        self.suggestions.clear();
        self.failure_notice = None;
        self.last_completed_at = None;
    }
}

/// Returns the session to `Idle` if the request future is dropped while its
/// request is still pending.
struct PendingGuard<'a> {
    session: &'a mut Session,
    request_id: SuggestionRequestId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let pending = SessionState::Pending {
            request_id: self.request_id,
        };
        if self.session.state == pending {
            self.session.state = SessionState::Idle;
            debug!(
                session_id = %self.session.id,
                request_id = %self.request_id,
                "request dropped before completion"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use phrasebridge_suggest::PhrasebookService;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Service that counts calls and always fails.
    #[derive(Default)]
    struct FailingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SuggestionService for FailingService {
        async fn generate(
            &self,
            _context: &ConversationContext,
        ) -> Result<Vec<Suggestion>, Report<GenerationError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(GenerationError::GenerationFailed {
                intent: phrasebridge_suggest::CanonicalIntent::ThankForInformation,
                language: "spanish".to_string(),
            }
            .into())
        }
    }

    /// Service that never answers before the session times out.
    struct StalledService;

    #[async_trait]
    impl SuggestionService for StalledService {
        async fn generate(
            &self,
            _context: &ConversationContext,
        ) -> Result<Vec<Suggestion>, Report<GenerationError>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    /// Synthesizer that records utterances.
    #[derive(Default)]
    struct RecordingSynthesizer {
        spoken: Mutex<Vec<Utterance>>,
    }

    impl SpeechSynthesizer for RecordingSynthesizer {
        fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
            self.spoken.lock().unwrap().push(utterance.clone());
            Ok(())
        }
    }

    struct MuteSynthesizer;

    impl SpeechSynthesizer for MuteSynthesizer {
        fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
            Err(SpeechError::VoiceUnavailable {
                locale: utterance.locale.clone(),
            })
        }
    }

    fn complete_context(target: &str) -> ConversationContext {
        ConversationContext::new("English", target)
            .with_user_message("Is the museum open?", "¿Está abierto el museo?")
            .with_response("Sí, hasta las seis.", "Yes, until six.")
    }

    fn filled_session(target: &str) -> Session {
        Session::default().with_context(complete_context(target))
    }

    #[tokio::test]
    async fn request_replaces_suggestions() {
        let mut session = filled_session("Spanish");
        let outcome = session
            .request_suggestions(&PhrasebookService::builtin())
            .await
            .expect("request");

        assert!(matches!(outcome, RequestOutcome::Completed { count: 3, .. }));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.suggestions().len(), 3);
        assert_eq!(session.suggestions()[0].translation, "¡Gracias por la información!");
        assert!(session.last_completed_at.is_some());
        assert!(session.failure_notice().is_none());
    }

    #[tokio::test]
    async fn incomplete_context_skips_service() {
        let service = FailingService::default();
        let mut session = Session::default()
            .with_context(ConversationContext::default().with_user_message("Hi", "Hola"));

        let outcome = session.request_suggestions(&service).await.expect("request");

        assert_eq!(
            outcome,
            RequestOutcome::Incomplete {
                missing: vec![ContextField::ResponseMessage, ContextField::ResponseTranslation],
            }
        );
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.failure_notice().is_none());
    }

    #[tokio::test]
    async fn failure_keeps_previous_suggestions() {
        let mut session = filled_session("French");
        session
            .request_suggestions(&PhrasebookService::builtin())
            .await
            .expect("first request");
        let before = session.suggestions().to_vec();

        let service = FailingService::default();
        let report = session
            .request_suggestions(&service)
            .await
            .expect_err("should fail");

        assert!(report.to_string().contains("generating suggestions failed"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.suggestions(), before.as_slice());
        assert_eq!(session.failure_notice(), Some(FAILURE_NOTICE));
    }

    #[tokio::test]
    async fn success_clears_failure_notice() {
        let mut session = filled_session("German");
        let _ = session.request_suggestions(&FailingService::default()).await;
        assert!(session.failure_notice().is_some());

        session
            .request_suggestions(&PhrasebookService::builtin())
            .await
            .expect("request");
        assert!(session.failure_notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_service_times_out() {
        let config = SessionConfig {
            request_timeout_ms: 50,
            ..SessionConfig::default()
        };
        let mut session = Session::new(config).with_context(complete_context("Italian"));

        let report = session
            .request_suggestions(&StalledService)
            .await
            .expect_err("should time out");

        assert!(report.to_string().contains("timed out after 50ms"));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.failure_notice(), Some(FAILURE_NOTICE));
    }

    #[test]
    fn begin_request_moves_to_pending() {
        let mut session = filled_session("Korean");
        let pending = session.begin_request().expect("begin");

        assert_eq!(
            session.state(),
            SessionState::Pending {
                request_id: pending.request_id
            }
        );
        assert!(session.state().is_pending());
        assert!(!session.state().can_request());
        assert_eq!(pending.context, session.context);
    }

    #[test]
    fn second_request_while_pending_is_refused() {
        let mut session = filled_session("Korean");
        let pending = session.begin_request().expect("begin");

        let report = session.begin_request().expect_err("should refuse");
        assert!(report.to_string().contains("still pending"));
        assert_eq!(
            session.state(),
            SessionState::Pending {
                request_id: pending.request_id
            }
        );
    }

    #[tokio::test]
    async fn request_while_pending_is_refused() {
        let mut session = filled_session("Korean");
        session.begin_request().expect("begin");

        let report = session
            .request_suggestions(&PhrasebookService::builtin())
            .await
            .expect_err("should refuse");
        assert!(report.to_string().contains("still pending"));
        assert!(session.suggestions().is_empty());
    }

    #[tokio::test]
    async fn pending_check_precedes_validation() {
        let service = FailingService::default();
        let mut session = filled_session("Korean");
        let pending = session.begin_request().expect("begin");
        session.context.clear_messages();

        let report = session
            .request_suggestions(&service)
            .await
            .expect_err("should refuse");
        assert!(report.to_string().contains("still pending"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            session.state(),
            SessionState::Pending {
                request_id: pending.request_id
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_request_returns_to_idle() {
        let mut session = filled_session("Spanish");
        let slow = PhrasebookService::builtin().with_latency(Duration::from_secs(5));

        let abandoned = tokio::time::timeout(
            Duration::from_millis(10),
            session.request_suggestions(&slow),
        )
        .await;
        assert!(abandoned.is_err());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.suggestions().is_empty());
        assert!(session.failure_notice().is_none());

        let outcome = session
            .request_suggestions(&PhrasebookService::builtin())
            .await
            .expect("request");
        assert!(matches!(outcome, RequestOutcome::Completed { count: 3, .. }));
        assert_eq!(session.suggestions().len(), 3);
    }

    #[test]
    fn begin_request_rejects_incomplete_context() {
        let mut session = Session::default();
        let report = session.begin_request().expect_err("should reject");
        assert!(report.to_string().contains("required fields are empty"));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn pending_snapshot_ignores_later_edits() {
        let mut session = filled_session("Spanish");
        let pending = session.begin_request().expect("begin");
        session.context.target_language = "Japanese".to_string();
        assert_eq!(pending.context.target_language, "Spanish");
    }

    #[test]
    fn cancelled_request_completion_is_stale() {
        let mut session = filled_session("Spanish");
        let pending = session.begin_request().expect("begin");

        assert_eq!(session.cancel(), Some(pending.request_id));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.cancel(), None);

        let report = session
            .complete(
                pending.request_id,
                Ok(vec![Suggestion::new("Thanks", "Gracias")]),
            )
            .expect_err("should be stale");
        assert!(report.to_string().contains("stale"));
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn completion_for_other_request_is_stale() {
        let mut session = filled_session("Spanish");
        let first = session.begin_request().expect("begin");
        session.cancel();
        let second = session.begin_request().expect("begin again");

        session
            .complete(first.request_id, Ok(vec![Suggestion::new("old", "viejo")]))
            .expect_err("should be stale");
        assert_eq!(
            session.state(),
            SessionState::Pending {
                request_id: second.request_id
            }
        );

        let count = session
            .complete(second.request_id, Ok(vec![Suggestion::new("new", "nuevo")]))
            .expect("complete");
        assert_eq!(count, 1);
        assert_eq!(session.suggestions()[0].translation, "nuevo");
    }

    #[tokio::test]
    async fn speak_uses_field_language() {
        let mut session = filled_session("Chinese");
        session
            .request_suggestions(&PhrasebookService::builtin())
            .await
            .expect("request");
        let synthesizer = RecordingSynthesizer::default();

        let source = session
            .speak(0, SuggestionField::Source, &synthesizer)
            .expect("speak source");
        let translation = session
            .speak(0, SuggestionField::Translation, &synthesizer)
            .expect("speak translation");

        assert_eq!(source.locale, "en-US");
        assert_eq!(source.text, "Thank you for the information!");
        assert_eq!(translation.locale, "zh-CN");
        assert_eq!(translation.text, "谢谢您的信息！");
        assert_eq!(translation.rate, 0.9);
        assert_eq!(synthesizer.spoken.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn speak_reports_errors() {
        let mut session = filled_session("Korean");
        let report = session
            .speak(0, SuggestionField::Source, &MuteSynthesizer)
            .expect_err("no suggestions yet");
        assert!(report.to_string().contains("no suggestion at index 0"));

        session
            .request_suggestions(&PhrasebookService::builtin())
            .await
            .expect("request");
        let report = session
            .speak(2, SuggestionField::Translation, &MuteSynthesizer)
            .expect_err("mute");
        assert!(report.to_string().contains("speaking translation of suggestion 2 failed"));
    }

    #[tokio::test]
    async fn reset_returns_to_defaults() {
        let mut session = filled_session("Japanese");
        session
            .request_suggestions(&PhrasebookService::builtin())
            .await
            .expect("request");
        session.context.user_language = "French".to_string();
        let pending = session.begin_request().expect("begin");

        session.reset();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.suggestions().is_empty());
        assert_eq!(session.context, ConversationContext::default());
        assert!(session.last_completed_at.is_none());
        assert!(
            session
                .complete(pending.request_id, Ok(Vec::new()))
                .is_err()
        );
    }

    #[test]
    fn heading_names_languages() {
        let session = filled_session("Italian");
        assert_eq!(session.heading(), "From English to Italian");
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_value(SessionState::Idle).expect("serialize");
        assert_eq!(json, serde_json::json!({"state": "idle"}));
    }
}
