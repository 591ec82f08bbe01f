//! Command-line arguments.

use clap::Parser;
use phrasebridge_suggest::ConversationContext;
use phrasebridge_suggest::context::{DEFAULT_TARGET_LANGUAGE, DEFAULT_USER_LANGUAGE};
use std::path::PathBuf;

/// Suggest replies for a bilingual conversation.
#[derive(Debug, Parser)]
#[command(name = "phrasebridge")]
#[command(about = "Suggest replies for a bilingual conversation")]
#[command(version)]
pub struct Args {
    /// Language you write in
    #[arg(long, default_value = DEFAULT_USER_LANGUAGE)]
    pub user_language: String,

    /// Language of the person you are talking to
    #[arg(long, default_value = DEFAULT_TARGET_LANGUAGE)]
    pub target_language: String,

    /// Your original message
    #[arg(long, default_value = "")]
    pub user_message: String,

    /// Translation of your message
    #[arg(long, default_value = "")]
    pub user_translation: String,

    /// Their response, in the target language
    #[arg(long, default_value = "")]
    pub response_message: String,

    /// Translation of their response
    #[arg(long, default_value = "")]
    pub response_translation: String,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print suggestions as JSON
    #[arg(long)]
    pub json: bool,

    /// Play every suggestion through the speech capability
    #[arg(long)]
    pub speak: bool,
}

impl Args {
    /// Builds the conversation context from the arguments.
    #[must_use]
    pub fn context(&self) -> ConversationContext {
        ConversationContext::new(&self.user_language, &self.target_language)
            .with_user_message(&self.user_message, &self.user_translation)
            .with_response(&self.response_message, &self.response_translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_english_and_spanish() {
        let args = Args::try_parse_from(["phrasebridge"]).expect("parse");
        let context = args.context();
        assert_eq!(context.user_language, "English");
        assert_eq!(context.target_language, "Spanish");
        assert!(!context.is_complete());
    }

    #[test]
    fn builds_complete_context() {
        let args = Args::try_parse_from([
            "phrasebridge",
            "--target-language",
            "Chinese",
            "--user-message",
            "Where is the bank?",
            "--user-translation",
            "银行在哪里？",
            "--response-message",
            "在左边。",
            "--response-translation",
            "On the left.",
            "--json",
        ])
        .expect("parse");

        let context = args.context();
        assert!(context.is_complete());
        assert_eq!(context.target_language, "Chinese");
        assert_eq!(context.response_translation, "On the left.");
        assert!(args.json);
        assert!(!args.speak);
    }
}
