//! Command-line front end for phrasebridge.
//!
//! Fills a conversation session from command-line arguments, requests
//! reply suggestions and prints them, optionally playing each field through
//! the speech capability.

pub mod cli;
pub mod config;
pub mod render;
pub mod speech;
