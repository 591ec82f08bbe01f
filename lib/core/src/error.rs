//! Error handling foundation for phrasebridge.
//!
//! Only the `Result` alias lives here. Each crate defines its own error
//! enums and wraps them in a rootcause `Report`, adding layer context with
//! `.context()` as failures cross crate boundaries.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
