//! OpenAI-compatible chat-completions provider with structured output.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use triage_core::config::ClassifierConfig;
use triage_core::errors::{ConfigError, ProviderError};
use triage_core::retry::RetryPolicy;
use triage_core::traits::ISemanticProvider;
use triage_embeddings::http;

use crate::prompt::SYSTEM_INSTRUCTION;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchema<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchema<'a> {
    name: &'static str,
    schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatContent,
}

#[derive(Debug, Deserialize)]
struct ChatContent {
    content: Option<String>,
}

/// Semantic provider speaking the chat-completions protocol.
pub struct HttpSemanticProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    retry: RetryPolicy,
    name: String,
}

impl HttpSemanticProvider {
    pub fn new(endpoint: &str, model: &str, api_key: String) -> Result<Self, ProviderError> {
        let name = format!("chat:{model}");
        Ok(Self {
            client: http::build_client(&name)?,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key,
            retry: RetryPolicy::default(),
            name,
        })
    }

    /// Build from the classifier section, reading the key from `api_key_env`.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ConfigError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            ConfigError::ValidationFailed {
                field: "classifier.api_key_env".to_string(),
                message: format!("environment variable {} is not set", config.api_key_env),
            }
        })?;
        Self::new(&config.provider_endpoint, &config.provider_model, api_key).map_err(|e| {
            ConfigError::ValidationFailed {
                field: "classifier".to_string(),
                message: e.to_string(),
            }
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Pull the JSON answer out of the first choice.
    fn parse(&self, body: Value) -> Result<Value, ProviderError> {
        let invalid = |reason: String| ProviderError::InvalidResponse {
            provider: self.name.clone(),
            reason,
        };
        let response: ChatResponse =
            serde_json::from_value(body).map_err(|e| invalid(e.to_string()))?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| invalid("no message content".to_string()))?;
        serde_json::from_str(&content).map_err(|e| invalid(format!("content is not JSON: {e}")))
    }
}

#[async_trait]
impl ISemanticProvider for HttpSemanticProvider {
    async fn complete(&self, prompt: &str, output_schema: &Value) -> Result<Value, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchema {
                    name: "triage_classification",
                    schema: output_schema,
                },
            },
        };
        let body = http::post_json(
            &self.client,
            &self.name,
            &self.endpoint,
            &self.api_key,
            &request,
            &self.retry,
        )
        .await?;
        self.parse(body)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> HttpSemanticProvider {
        HttpSemanticProvider::new("http://127.0.0.1:9/v1/chat/completions", "m", "k".into())
            .unwrap()
            .with_retry(RetryPolicy::none())
    }

    #[test]
    fn parse_extracts_json_content() {
        let body = json!({"choices": [{"message": {"content": "{\"category\": \"general\"}"}}]});
        assert_eq!(provider().parse(body).unwrap(), json!({"category": "general"}));
    }

    #[test]
    fn parse_rejects_empty_choices_and_prose() {
        assert!(provider().parse(json!({"choices": []})).is_err());
        let prose = json!({"choices": [{"message": {"content": "It is general."}}]});
        assert!(matches!(
            provider().parse(prose),
            Err(ProviderError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn missing_key_is_config_error() {
        let config = ClassifierConfig {
            api_key_env: "TRIAGE_TEST_CHAT_KEY_THAT_IS_NEVER_SET".to_string(),
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            HttpSemanticProvider::from_config(&config),
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_provider_error() {
        let result = provider().complete("p", &json!({})).await;
        assert!(matches!(
            result,
            Err(ProviderError::Unavailable { .. }) | Err(ProviderError::Timeout { .. })
        ));
    }

    #[test]
    fn name_carries_model() {
        assert_eq!(provider().name(), "chat:m");
    }
}
