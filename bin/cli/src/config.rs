//! Application configuration.
//!
//! Composed from the library configs and loaded via the `config` crate from
//! an optional file, overridden by environment variables such as
//! `PHRASEBRIDGE__SUGGESTIONS__LATENCY_MS=0`.

use phrasebridge_conversation::SessionConfig;
use phrasebridge_suggest::SuggestionConfig;
use serde::Deserialize;
use std::path::Path;

/// Prefix of environment variables read by [`AppConfig::load`].
pub const ENV_PREFIX: &str = "PHRASEBRIDGE";

/// Application configuration composed from library configs.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Suggestion service configuration.
    #[serde(default)]
    pub suggestions: SuggestionConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Loads configuration from an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_defaults_without_file() {
        let config = AppConfig::load(None).expect("load");
        assert_eq!(config.session.speech.rate, 0.9);
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        write!(
            file,
            r#"
[suggestions]
latency_ms = 0

[suggestions.translations.portuguese]
thank_for_information = "Obrigado pela informação!"

[suggestions.augmentations.korean]
transliterations = ["Jeongbo gamsahamnida!"]

[session]
request_timeout_ms = 2500

[session.speech]
rate = 0.8
"#
        )
        .expect("write config");

        let config = AppConfig::load(Some(file.path())).expect("load");

        assert_eq!(config.suggestions.latency_ms, 0);
        assert_eq!(
            config.suggestions.translations["portuguese"]["thank_for_information"],
            "Obrigado pela informação!"
        );
        assert_eq!(
            config.suggestions.augmentations["korean"].transliterations,
            vec!["Jeongbo gamsahamnida!".to_string()]
        );
        assert_eq!(config.session.request_timeout_ms, 2500);
        assert_eq!(config.session.speech.rate, 0.8);
        assert_eq!(config.session.speech.pitch, 1.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }
}
