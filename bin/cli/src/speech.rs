//! Speech capability for the terminal.
//!
//! No speech engine ships with phrasebridge; this synthesizer records what
//! would be played in the log.

use phrasebridge_conversation::{SpeechError, SpeechSynthesizer, Utterance};
use tracing::info;

/// Synthesizer that logs each utterance instead of playing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSynthesizer;

impl SpeechSynthesizer for LogSynthesizer {
    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        info!(
            locale = %utterance.locale,
            pitch = utterance.pitch,
            rate = utterance.rate,
            text = %utterance.text,
            "speak"
        );
        Ok(())
    }
}
