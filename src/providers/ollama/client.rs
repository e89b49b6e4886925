use reqwest::Client;
use tracing::instrument;

use super::types::*;
use crate::provider::LLMProvider;
use crate::providers::read_envelope;
use crate::types::{GenerationConfig, ProviderKind};
use crate::GenerationError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Local Ollama server. Needs no credential.
pub struct OllamaProvider {
    client: Client,
    model: String,
    temperature: f32,
    num_predict: u32,
    base_url: String,
}

impl OllamaProvider {
    pub fn new(client: Client, config: &GenerationConfig) -> Self {
        Self::new_with_base_url(client, config, DEFAULT_BASE_URL.to_string())
    }

    pub fn new_with_base_url(client: Client, config: &GenerationConfig, base_url: String) -> Self {
        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            num_predict: config.max_output_tokens,
            base_url,
        }
    }

    fn convert_request(&self, prompt: &str) -> OllamaRequest {
        OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
                num_predict: self.num_predict,
            },
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for OllamaProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    #[instrument(level = "debug", skip_all, fields(provider = "ollama", model = %self.model))]
    async fn submit_prompt(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = self.convert_request(prompt);

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::from_reqwest(self.kind(), e))?;

        let body: OllamaResponse = read_envelope(self.kind(), response).await?;
        tracing::info!(
            eval_count = ?body.eval_count,
            total_duration_ns = ?body.total_duration,
            done = body.done,
            "Ollama generation finished"
        );
        Ok(body.response)
    }
}
