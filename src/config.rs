use crate::i18n::LanguageCode;
use crate::translation::google::DEFAULT_GOOGLE_TRANSLATE_URL;
use crate::translation::openai::DEFAULT_OPENAI_API_URL;
use anyhow::{bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;

/// Which translation service backs the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorKind {
    Google,
    OpenAi,
    Disabled,
}

impl FromStr for TranslatorKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "google" => Ok(TranslatorKind::Google),
            "openai" => Ok(TranslatorKind::OpenAi),
            "none" | "disabled" | "off" => Ok(TranslatorKind::Disabled),
            other => bail!(
                "Unknown translator '{}' (expected google, openai or none)",
                other
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Translation service
    pub translator: TranslatorKind,
    pub translation_timeout: Duration,

    // Google web translation endpoint
    pub google_translate_url: String,

    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,

    // Shell
    pub display_language: LanguageCode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let translator = match std::env::var("TRANSLATOR") {
            Ok(value) => value
                .parse::<TranslatorKind>()
                .context("Invalid TRANSLATOR")?,
            Err(_) => TranslatorKind::Google,
        };

        let timeout_secs: u64 = match std::env::var("TRANSLATION_TIMEOUT_SECS") {
            Ok(value) => value
                .trim()
                .parse()
                .with_context(|| format!("Invalid TRANSLATION_TIMEOUT_SECS '{}'", value))?,
            Err(_) => 5,
        };
        if timeout_secs == 0 {
            bail!("TRANSLATION_TIMEOUT_SECS must be greater than zero");
        }

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if translator == TranslatorKind::OpenAi && openai_api_key.is_none() {
            bail!("OPENAI_API_KEY not set (required when TRANSLATOR=openai)");
        }

        Ok(Self {
            translator,
            translation_timeout: Duration::from_secs(timeout_secs),

            google_translate_url: std::env::var("GOOGLE_TRANSLATE_URL")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_TRANSLATE_URL.to_string()),

            openai_api_key,
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),

            display_language: std::env::var("DISPLAY_LANGUAGE")
                .map(|value| LanguageCode::parse(&value))
                .unwrap_or_else(|_| LanguageCode::parse("en")),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorKind::Google,
            translation_timeout: Duration::from_secs(5),
            google_translate_url: DEFAULT_GOOGLE_TRANSLATE_URL.to_string(),
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            display_language: LanguageCode::parse("en"),
        }
    }
}
