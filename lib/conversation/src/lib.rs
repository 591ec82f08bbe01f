//! Conversation session for phrasebridge.
//!
//! This crate provides:
//!
//! - **Session**: the conversation context being edited, the current
//!   suggestions, and the Idle/Pending request state machine
//! - **Speech**: the language-to-locale table and the speech capability
//!   suggestions are played through

pub mod config;
pub mod error;
pub mod session;
pub mod speech;

pub use config::{SessionConfig, SpeechConfig};
pub use error::{SessionError, SpeechError};
pub use session::{PendingRequest, RequestOutcome, Session, SessionState};
pub use speech::{SpeechSynthesizer, SuggestionField, Utterance, locale_for};
