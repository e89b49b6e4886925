use reqwest::Client;
use tracing::instrument;

use super::types::*;
use crate::provider::LLMProvider;
use crate::providers::read_envelope;
use crate::types::{Credential, GenerationConfig, ProviderKind};
use crate::GenerationError;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic Claude provider implementation.
pub struct AnthropicProvider {
    client: Client,
    api_key: Credential,
    model: String,
    max_tokens: u32,
    base_url: String,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider.
    pub fn new(client: Client, config: &GenerationConfig) -> Result<Self, GenerationError> {
        Self::new_with_base_url(client, config, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new Anthropic provider with custom base URL (for testing).
    pub fn new_with_base_url(
        client: Client,
        config: &GenerationConfig,
        base_url: String,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            client,
            api_key: config.require_credential()?.clone(),
            model: config.model.clone(),
            max_tokens: config.max_output_tokens,
            base_url,
        })
    }

    /// Convert a prompt to Anthropic format.
    /// The messages payload carries a single user turn and no sampling temperature.
    fn convert_request(&self, prompt: &str) -> AnthropicRequest {
        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    #[instrument(level = "debug", skip_all, fields(provider = "anthropic", model = %self.model))]
    async fn submit_prompt(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = self.convert_request(prompt);

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::from_reqwest(self.kind(), e))?;

        let body: AnthropicResponse = read_envelope(self.kind(), response).await?;
        if let Some(usage) = &body.usage {
            tracing::info!(
                input_tokens = ?usage.input_tokens,
                output_tokens = ?usage.output_tokens,
                stop_reason = ?body.stop_reason,
                "Anthropic usage"
            );
        }

        body.into_text()
            .ok_or_else(|| GenerationError::parse("Anthropic response has no text content block"))
    }
}
