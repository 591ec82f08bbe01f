//! Canonical reply intents.
//!
//! Every generation call offers the same intents in the same order. The
//! canonical phrase of each intent is English; resolvers translate from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A reply concept the service always offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalIntent {
    /// Acknowledge and thank for the information.
    ThankForInformation,
    /// Ask the other party to explain again.
    RequestClarification,
    /// Accept and ask for a recommendation.
    AskForRecommendation,
}

impl CanonicalIntent {
    /// All intents, in the order suggestions are produced.
    pub const ALL: [Self; 3] = [
        Self::ThankForInformation,
        Self::RequestClarification,
        Self::AskForRecommendation,
    ];

    /// Returns the canonical English phrase for this intent.
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::ThankForInformation => "Thank you for the information!",
            Self::RequestClarification => "Could you please explain that again?",
            Self::AskForRecommendation => "I understand. What would you recommend?",
        }
    }

    /// Returns the position of this intent within [`Self::ALL`].
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::ThankForInformation => 0,
            Self::RequestClarification => 1,
            Self::AskForRecommendation => 2,
        }
    }

    /// Returns the snake_case identifier used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThankForInformation => "thank_for_information",
            Self::RequestClarification => "request_clarification",
            Self::AskForRecommendation => "ask_for_recommendation",
        }
    }
}

impl fmt::Display for CanonicalIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown intent identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIntent(pub String);

impl fmt::Display for UnknownIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown intent: {}", self.0)
    }
}

impl std::error::Error for UnknownIntent {}

impl FromStr for CanonicalIntent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| UnknownIntent(s.to_string()))
    }
}
