//! Adapter for the public Google web-translate endpoint.
//!
//! `GET <endpoint>?client=gtx&sl=<source>&tl=<target>&dt=t&q=<text>`
//! answers with a nested JSON array whose first element lists the
//! translated segments as `[translated, original, ...]`.

use crate::error::TranslationError;
use crate::i18n::LanguageRegistry;
use crate::translation::Translator;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_GOOGLE_TRANSLATE_URL: &str =
    "https://translate.googleapis.com/translate_a/single";

pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
    }

    fn supports(&self, code: &str) -> bool {
        LanguageRegistry::get().is_supported(code)
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        if !self.supports(source) || !self.supports(target) {
            return Err(TranslationError::UnsupportedLanguage {
                from: source.to_string(),
                to: target.to_string(),
            });
        }

        debug!("Requesting {} -> {} translation from Google", source, target);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslationError::Api { status, body });
        }

        let body: Value = response.json().await?;
        parse_translation(&body)
    }
}

/// Concatenate the translated segments of a web-translate response.
fn parse_translation(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Malformed("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslationError::EmptyResponse);
    }

    Ok(translated)
}
