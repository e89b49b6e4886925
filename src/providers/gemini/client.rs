use reqwest::Client;
use tracing::instrument;

use super::types::*;
use crate::provider::LLMProvider;
use crate::providers::read_envelope;
use crate::types::{Credential, GenerationConfig, ProviderKind};
use crate::GenerationError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider implementation (Generative Language API).
pub struct GeminiProvider {
    client: Client,
    api_key: Credential,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(client: Client, config: &GenerationConfig) -> Result<Self, GenerationError> {
        Self::new_with_base_url(client, config, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new Gemini provider with custom base URL (for testing).
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
            max_output_tokens: config.max_output_tokens,
            base_url,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn convert_request(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    #[instrument(level = "debug", skip_all, fields(provider = "gemini", model = %self.model))]
    async fn submit_prompt(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = self.convert_request(prompt);

        // The key travels as a query parameter, so the URL itself is never logged.
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.expose())])
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::from_reqwest(self.kind(), e.without_url()))?;

        let body: GeminiResponse = read_envelope(self.kind(), response).await?;
        if let Some(usage) = &body.usage_metadata {
            tracing::info!(
                prompt_tokens = ?usage.prompt_token_count,
                candidates_tokens = ?usage.candidates_token_count,
                "Gemini usage"
            );
        }

        body.into_text()
            .ok_or_else(|| GenerationError::parse("Gemini response has no candidate text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        let config = GenerationConfig::new(ProviderKind::Gemini, "g-key", "gemini-1.5-flash")
            .temperature(0.5)
            .max_output_tokens(800);
        GeminiProvider::new_with_base_url(Client::new(), &config, "http://mock".to_string())
            .unwrap()
    }

    #[test]
    fn test_endpoint_embeds_model() {
        assert_eq!(
            provider().endpoint(),
            "http://mock/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_conversion() {
        let request = serde_json::to_value(provider().convert_request("Hi")).unwrap();
        assert_eq!(
            request,
            serde_json::json!({
                "contents": [{"parts": [{"text": "Hi"}]}],
                "generationConfig": {"temperature": 0.5, "maxOutputTokens": 800}
            })
        );
    }

    #[test]
    fn test_blocked_candidate_has_no_text() {
        let body: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
        )
        .unwrap();
        assert!(body.into_text().is_none());
    }
}
