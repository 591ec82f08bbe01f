//! Strongly-typed identifiers.
//!
//! IDs wrap a ULID so that request IDs issued by the same session sort in
//! issue order. They display as `<prefix>_<ulid>` in logs and error
//! messages, and serialize as the bare ULID.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a fresh ID.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifies one conversation session, from creation until reset.
    ConversationSessionId,
    "sess"
);

define_id!(
    /// Identifies a single suggestion request issued by a session.
    ///
    /// A completion carrying a request ID other than the session's current
    /// pending one is stale and gets discarded.
    SuggestionRequestId,
    "sreq"
);
