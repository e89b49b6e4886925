use reqwest::Client;

use crate::providers::{anthropic, gemini, ollama, openai};
use crate::{
    AnthropicProvider, GeminiProvider, GenerationConfig, GenerationError, LLMProvider,
    OllamaProvider, OpenAIProvider, ProviderKind,
};

/// Base URLs for each provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub openai: String,
    pub anthropic: String,
    pub gemini: String,
    pub ollama: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openai: openai::client::DEFAULT_BASE_URL.to_string(),
            anthropic: anthropic::client::DEFAULT_BASE_URL.to_string(),
            gemini: gemini::client::DEFAULT_BASE_URL.to_string(),
            ollama: ollama::client::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every provider at the same base URL, e.g. a mock server.
    pub fn all(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            openai: base_url.clone(),
            anthropic: base_url.clone(),
            gemini: base_url.clone(),
            ollama: base_url,
        }
    }

    pub fn with_openai(mut self, base_url: impl Into<String>) -> Self {
        self.openai = base_url.into();
        self
    }

    pub fn with_anthropic(mut self, base_url: impl Into<String>) -> Self {
        self.anthropic = base_url.into();
        self
    }

    pub fn with_gemini(mut self, base_url: impl Into<String>) -> Self {
        self.gemini = base_url.into();
        self
    }

    pub fn with_ollama(mut self, base_url: impl Into<String>) -> Self {
        self.ollama = base_url.into();
        self
    }

    pub fn for_provider(&self, provider: ProviderKind) -> &str {
        match provider {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Ollama => &self.ollama,
        }
    }
}

/// Factory for creating LLM providers.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider from configuration. The configuration is validated first.
    pub fn create(
        config: &GenerationConfig,
        endpoints: &Endpoints,
        client: Client,
    ) -> Result<Box<dyn LLMProvider>, GenerationError> {
        config.validate()?;

        let base_url = endpoints.for_provider(config.provider).to_string();
        let provider: Box<dyn LLMProvider> = match config.provider {
            ProviderKind::OpenAi => Box::new(OpenAIProvider::new_with_base_url(
                client, config, base_url,
            )?),
            ProviderKind::Anthropic => Box::new(AnthropicProvider::new_with_base_url(
                client, config, base_url,
            )?),
            ProviderKind::Gemini => Box::new(GeminiProvider::new_with_base_url(
                client, config, base_url,
            )?),
            ProviderKind::Ollama => Box::new(OllamaProvider::new_with_base_url(
                client, config, base_url,
            )),
        };
        Ok(provider)
    }
}
