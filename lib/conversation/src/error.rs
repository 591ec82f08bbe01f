//! Error types for the conversation crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `SessionError`: errors from session operations
//! - `SpeechError`: errors from a speech capability
//!
//! An incomplete context is not an error when it goes through
//! [`Session::request_suggestions`](crate::session::Session::request_suggestions);
//! that path reports it as [`RequestOutcome::Incomplete`](crate::session::RequestOutcome).

use crate::speech::SuggestionField;
use phrasebridge_core::SuggestionRequestId;
use phrasebridge_suggest::ContextField;
use std::fmt;

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// One or more required message fields are empty.
    ValidationIncomplete { missing: Vec<ContextField> },
    /// A request is already in flight.
    AlreadyPending { request_id: SuggestionRequestId },
    /// A completion arrived for a request that is no longer pending.
    StaleCompletion { request_id: SuggestionRequestId },
    /// The generation call failed (use as context wrapper).
    GenerationFailed { request_id: SuggestionRequestId },
    /// No suggestion at the requested position.
    SuggestionOutOfRange { index: usize, len: usize },
    /// Playing a suggestion field failed (use as context wrapper).
    SpeechFailed { index: usize, field: SuggestionField },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationIncomplete { missing } => {
                let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
                write!(f, "required fields are empty: {}", names.join(", "))
            }
            Self::AlreadyPending { request_id } => {
                write!(f, "request {request_id} is still pending")
            }
            Self::StaleCompletion { request_id } => {
                write!(f, "ignoring completion of stale request {request_id}")
            }
            Self::GenerationFailed { request_id } => {
                write!(f, "generating suggestions failed for request {request_id}")
            }
            Self::SuggestionOutOfRange { index, len } => {
                write!(f, "no suggestion at index {index} (have {len})")
            }
            Self::SpeechFailed { index, field } => {
                write!(f, "speaking {field} of suggestion {index} failed")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors from a speech capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// No voice for the locale.
    VoiceUnavailable { locale: String },
    /// The platform refused or aborted playback.
    PlaybackFailed { reason: String },
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VoiceUnavailable { locale } => {
                write!(f, "no speech voice available for {locale}")
            }
            Self::PlaybackFailed { reason } => {
                write!(f, "speech playback failed: {reason}")
            }
        }
    }
}

impl std::error::Error for SpeechError {}
