use reqwest::Client;
use tracing::instrument;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::prompt::SYSTEM_INSTRUCTION;
use crate::provider::LLMProvider;
use crate::providers::read_envelope;
use crate::types::{Credential, GenerationConfig, ProviderKind};
use crate::GenerationError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI provider implementation.
pub struct OpenAIProvider {
    client: Client,
    api_key: Credential,
    model: String,
    temperature: f32,
    max_tokens: u32,
    base_url: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider.
    pub fn new(client: Client, config: &GenerationConfig) -> Result<Self, GenerationError> {
        Self::new_with_base_url(client, config, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new OpenAI provider with custom base URL.
    pub fn new_with_base_url(
        client: Client,
        config: &GenerationConfig,
        base_url: String,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            client,
            api_key: config.require_credential()?.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_output_tokens,
            base_url,
        })
    }

    /// Build the chat completions payload for a prompt.
    fn convert_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for OpenAIProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    #[instrument(level = "debug", skip_all, fields(provider = "openai", model = %self.model))]
    async fn submit_prompt(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = self.convert_request(prompt);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::from_reqwest(self.kind(), e))?;

        let body: ChatCompletionResponse = read_envelope(self.kind(), response).await?;
        if let Some(usage) = &body.usage {
            tracing::info!(
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                "OpenAI usage"
            );
        }

        body.into_text()
            .ok_or_else(|| GenerationError::parse("OpenAI response has no message content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GenerationConfig {
        GenerationConfig::new(ProviderKind::OpenAi, "test-key", "gpt-4")
            .temperature(0.3)
            .max_output_tokens(100)
    }

    #[test]
    fn test_provider_creation_requires_key() {
        assert!(OpenAIProvider::new(Client::new(), &config()).is_ok());

        let mut no_key = config();
        no_key.credential = None;
        assert!(OpenAIProvider::new(Client::new(), &no_key).is_err());
    }

    #[test]
    fn test_request_conversion() {
        let provider = OpenAIProvider::new(Client::new(), &config()).unwrap();
        let request = provider.convert_request("Make a problem");

        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.max_tokens, 100);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[1].content, "Make a problem");
    }

    #[test]
    fn test_response_text_extraction() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"id": "chatcmpl-1", "choices": [{"index": 0, "message": {"role": "assistant", "content": "hi"}, "finish_reason": "stop"}]}"#,
        )
        .unwrap();
        assert_eq!(body.into_text().as_deref(), Some("hi"));

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(empty.into_text().is_none());
    }
}
