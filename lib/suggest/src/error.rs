//! Error types for the suggestion crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ResolveError`: failures of a translation resolver backend
//! - `GenerationError`: a generation call as a whole (use as context wrapper)
//!
//! A translation that simply does not exist is not an error. Resolvers
//! report it in-band with the sentinel from
//! [`unavailable_translation`](crate::resolver::unavailable_translation).

use crate::intent::CanonicalIntent;
use std::fmt;

/// Errors from translation resolver backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Backend is unavailable.
    BackendUnavailable { backend: String, reason: String },
    /// Request to the backend failed.
    RequestFailed { reason: String },
    /// Backend answered with something that is not a translation.
    MalformedOutput { reason: String },
    /// Rate limit exceeded.
    RateLimited { retry_after_secs: Option<u64> },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendUnavailable { backend, reason } => {
                write!(f, "translation backend '{backend}' unavailable: {reason}")
            }
            Self::RequestFailed { reason } => {
                write!(f, "translation request failed: {reason}")
            }
            Self::MalformedOutput { reason } => {
                write!(f, "malformed translation output: {reason}")
            }
            Self::RateLimited { retry_after_secs } => {
                if let Some(secs) = retry_after_secs {
                    write!(f, "rate limited, retry after {secs}s")
                } else {
                    write!(f, "rate limited")
                }
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Errors from a suggestion generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Resolving one intent failed, so the whole call failed.
    GenerationFailed {
        intent: CanonicalIntent,
        language: String,
    },
    /// The call did not finish in time.
    TimedOut { after_ms: u64 },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerationFailed { intent, language } => {
                write!(
                    f,
                    "suggestion generation failed resolving '{intent}' into {language}"
                )
            }
            Self::TimedOut { after_ms } => {
                write!(f, "suggestion generation timed out after {after_ms}ms")
            }
        }
    }
}

impl std::error::Error for GenerationError {}
