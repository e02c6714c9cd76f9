//! Translation gateway: the capability the comparator uses to bring a name
//! into another identity's language.
//!
//! Translation is a network call that may be slow, refused, or simply
//! wrong, so every implementation returns a `Result` and the comparator
//! decides what to do with a failure. Nothing here retries.

pub mod google;
pub mod metrics;
pub mod openai;
pub mod validator;

pub use google::GoogleTranslator;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use openai::OpenAiTranslator;
pub use validator::TranslationValidator;

use crate::config::{Config, TranslatorKind};
use crate::error::TranslationError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

/// A text translation service keyed by (text, source code, target code).
#[async_trait]
pub trait Translator: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether the service accepts this language code.
    fn supports(&self, _code: &str) -> bool {
        true
    }

    /// Translate `text` from `source` into `target`.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}

/// Stand-in used when no translation service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn translate(
        &self,
        _text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, TranslationError> {
        Err(TranslationError::NotConfigured)
    }
}

/// Build the translator selected in the configuration.
pub fn build_translator(config: &Config) -> Result<Box<dyn Translator>> {
    let translator: Box<dyn Translator> = match config.translator {
        TranslatorKind::Disabled => Box::new(DisabledTranslator),
        TranslatorKind::Google => {
            let client = http_client(config)?;
            Box::new(GoogleTranslator::new(client, &config.google_translate_url))
        }
        TranslatorKind::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .context("OPENAI_API_KEY not set")?;
            let client = http_client(config)?;
            Box::new(OpenAiTranslator::new(
                client,
                &config.openai_api_url,
                api_key,
                &config.openai_model,
            ))
        }
    };

    info!("Using {} translator", translator.name());
    Ok(translator)
}

fn http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.translation_timeout)
        .build()
        .context("Failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_translator_always_fails() {
        let result = DisabledTranslator.translate("Henri", "fr", "en").await;
        assert_eq!(result, Err(TranslationError::NotConfigured));
    }

    #[test]
    fn test_disabled_translator_supports_everything() {
        assert!(DisabledTranslator.supports("fr"));
        assert!(DisabledTranslator.supports("xx"));
    }

    #[test]
    fn test_build_translator_disabled() {
        let config = Config {
            translator: TranslatorKind::Disabled,
            ..Config::default()
        };
        let translator = build_translator(&config).expect("Should build");
        assert_eq!(translator.name(), "disabled");
    }

    #[test]
    fn test_build_translator_google() {
        let translator = build_translator(&Config::default()).expect("Should build");
        assert_eq!(translator.name(), "google");
    }

    #[test]
    fn test_build_translator_openai_without_key_fails() {
        let config = Config {
            translator: TranslatorKind::OpenAi,
            openai_api_key: None,
            ..Config::default()
        };
        assert!(build_translator(&config).is_err());
    }

    #[test]
    fn test_build_translator_openai() {
        let config = Config {
            translator: TranslatorKind::OpenAi,
            openai_api_key: Some("sk-test".to_string()),
            ..Config::default()
        };
        let translator = build_translator(&config).expect("Should build");
        assert_eq!(translator.name(), "openai");
    }
}
