//! Core types shared across the phrasebridge crates.
//!
//! This crate provides the `Result` alias used for layered error reporting
//! and the strongly-typed identifiers for conversation sessions and the
//! suggestion requests they issue.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ConversationSessionId, SuggestionRequestId};
