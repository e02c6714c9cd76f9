use crate::error::TranslationError;
use crate::i18n::LanguageRegistry;
use crate::translation::Translator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI Chat Completion request for name translation
#[derive(Debug, Serialize)]
struct TranslationRequest {
    model: String,
    messages: Vec<Message>,
    max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Translates personal names with a chat-completions model.
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiTranslator {
    pub fn new(client: reqwest::Client, api_url: &str, api_key: String, model: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            api_key,
            model: model.to_string(),
        }
    }

    fn build_request(&self, text: &str, source: &str, target: &str) -> TranslationRequest {
        // Reasoning models need headroom for hidden reasoning tokens
        let is_reasoning = is_reasoning_model(&self.model);

        TranslationRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_system_prompt(),
                },
                Message {
                    role: "user".to_string(),
                    content: build_user_prompt(text, source, target),
                },
            ],
            max_completion_tokens: if is_reasoning { 2000 } else { 50 },
            temperature: if is_reasoning { None } else { Some(0.0) },
            reasoning_effort: if is_reasoning {
                Some("low".to_string())
            } else {
                None
            },
        }
    }
}

/// English name of a code when the catalogue knows it, the code otherwise
fn language_label(code: &str) -> &str {
    LanguageRegistry::get()
        .get_by_code(code)
        .map(|info| info.name)
        .unwrap_or(code)
}

fn build_system_prompt() -> String {
    r#"You translate personal names between languages, the way a registrar would record the same person's name in another country.

Rules:
- Reply with the translated name only, on a single line
- No quotes, no explanations, no alternatives
- If the name has a conventional equivalent in the target language, use it (e.g. Henry -> Henri in French)
- Otherwise transliterate it into the target language's script, or return it unchanged"#
        .to_string()
}

fn build_user_prompt(text: &str, source: &str, target: &str) -> String {
    format!(
        "Translate this {} name into {}: {}",
        language_label(source),
        language_label(target),
        text
    )
}

#[async_trait]
impl Translator for OpenAiTranslator {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let request = self.build_request(text, source, target);

        debug!(
            "Requesting {} -> {} translation from OpenAI ({})",
            source, target, self.model
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
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

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                TranslationError::Malformed("response contained no choices".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_openai_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": content
                    },
                    "finish_reason": "stop"
                }
            ]
        })
    }

    fn translator_for(mock_server: &MockServer, model: &str) -> OpenAiTranslator {
        OpenAiTranslator::new(
            reqwest::Client::new(),
            &format!("{}/v1/chat/completions", mock_server.uri()),
            "test-openai-key".to_string(),
            model,
        )
    }

    // ==================== Prompt Tests ====================

    #[test]
    fn test_user_prompt_uses_language_names() {
        let prompt = build_user_prompt("henry", "en", "fr");
        assert!(prompt.contains("English"));
        assert!(prompt.contains("French"));
        assert!(prompt.ends_with("henry"));
    }

    #[test]
    fn test_user_prompt_falls_back_to_code() {
        let prompt = build_user_prompt("henry", "xx", "fr");
        assert!(prompt.contains("xx"));
    }

    #[test]
    fn test_system_prompt_asks_for_name_only() {
        let prompt = build_system_prompt();
        assert!(prompt.contains("translated name only"));
        assert!(prompt.contains("single line"));
    }

    // ==================== Request Structure Tests ====================

    #[test]
    fn test_translation_request_serialization() {
        let translator = OpenAiTranslator::new(
            reqwest::Client::new(),
            DEFAULT_OPENAI_API_URL,
            "key".to_string(),
            "gpt-4o-mini",
        );
        let request = translator.build_request("henry", "en", "fr");

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("gpt-4o-mini"));
        assert!(json.contains("\"temperature\":0.0"));
        assert!(json.contains("max_completion_tokens"));
        assert!(json.contains("system"));
        assert!(json.contains("user"));
        // reasoning_effort should not be serialized when None
        assert!(!json.contains("reasoning_effort"));
    }

    #[test]
    fn test_translation_request_serialization_reasoning_model() {
        let translator = OpenAiTranslator::new(
            reqwest::Client::new(),
            DEFAULT_OPENAI_API_URL,
            "key".to_string(),
            "gpt-5-mini",
        );
        let request = translator.build_request("henry", "en", "fr");

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("reasoning_effort"));
        assert!(json.contains("low"));
        // temperature should not be serialized when None
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_is_reasoning_model() {
        assert!(is_reasoning_model("gpt-5-mini"));
        assert!(is_reasoning_model("o1-mini"));
        assert!(is_reasoning_model("o3"));
        assert!(is_reasoning_model("o4-mini"));
        assert!(!is_reasoning_model("gpt-4o-mini"));
        assert!(!is_reasoning_model("gpt-4-turbo"));
    }

    // ==================== Integration Tests with Wiremock ====================

    #[tokio::test]
    async fn test_translate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-openai-key"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4o-mini"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response("Henri")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = translator_for(&mock_server, "gpt-4o-mini");
        let result = translator.translate("henry", "en", "fr").await;

        assert_eq!(result, Ok("Henri".to_string()));
    }

    #[tokio::test]
    async fn test_translate_api_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = translator_for(&mock_server, "gpt-4o-mini");
        let result = translator.translate("henry", "en", "fr").await;

        assert_eq!(
            result,
            Err(TranslationError::Api {
                status: 500,
                body: "Internal Server Error".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_translate_empty_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let translator = translator_for(&mock_server, "gpt-4o-mini");
        let result = translator.translate("henry", "en", "fr").await;

        match result {
            Err(TranslationError::Malformed(message)) => assert!(message.contains("no choices")),
            other => panic!("Expected malformed response, got {:?}", other),
        }
    }
}
