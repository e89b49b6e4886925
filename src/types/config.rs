use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GenerationError;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;

/// Supported text-generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
    /// Local Ollama server.
    Ollama,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Gemini,
        ProviderKind::Ollama,
    ];

    /// Hosted providers need an API key, the local server does not.
    pub fn requires_credential(&self) -> bool {
        !matches!(self, ProviderKind::Ollama)
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-sonnet-20241022",
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::Ollama => "llama3.1",
        }
    }

    /// Conventional environment variable holding this provider's API key.
    pub fn credential_env_var(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderKind::Gemini => Some("GEMINI_API_KEY"),
            ProviderKind::Ollama => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "ollama" | "local" => Ok(ProviderKind::Ollama),
            _ => Err(GenerationError::unsupported(s.trim())),
        }
    }
}

/// An API key. The secret never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Credential(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<&str> for Credential {
    fn from(s: &str) -> Self {
        Credential::new(s)
    }
}

impl From<String> for Credential {
    fn from(s: String) -> Self {
        Credential(s)
    }
}

/// Everything needed to talk to one provider.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub provider: ProviderKind,
    pub credential: Option<Credential>,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Create a configuration with default sampling parameters.
    pub fn new(
        provider: ProviderKind,
        credential: impl Into<Credential>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            credential: Some(credential.into()),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Create a configuration for the local Ollama server.
    pub fn local(model: impl Into<String>) -> Self {
        Self {
            provider: ProviderKind::Ollama,
            credential: None,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// The credential, or an error if a hosted provider has none.
    pub fn require_credential(&self) -> Result<&Credential, GenerationError> {
        match &self.credential {
            Some(credential) if !credential.is_blank() => Ok(credential),
            _ => Err(GenerationError::config(format!(
                "API key required for {} provider",
                self.provider
            ))),
        }
    }

    /// Check the configuration before any request is sent.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.provider.requires_credential() {
            self.require_credential()?;
        }
        if self.model.trim().is_empty() {
            return Err(GenerationError::config("model identifier must not be empty"));
        }
        if self.max_output_tokens == 0 {
            return Err(GenerationError::config(
                "max_output_tokens must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Create configuration from environment variables.
    ///
    /// * `MATHFARM_AI_PROVIDER` - openai, anthropic, gemini or ollama (default openai)
    /// * `MATHFARM_AI_API_KEY` - falls back to the provider's usual variable, e.g. `OPENAI_API_KEY`
    /// * `MATHFARM_AI_MODEL` - defaults to [`ProviderKind::default_model`]
    /// * `MATHFARM_AI_TEMPERATURE`, `MATHFARM_AI_MAX_TOKENS`
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GenerationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match lookup("MATHFARM_AI_PROVIDER") {
            Some(name) => name.parse::<ProviderKind>()?,
            None => ProviderKind::OpenAi,
        };

        let credential = lookup("MATHFARM_AI_API_KEY")
            .or_else(|| provider.credential_env_var().and_then(|var| lookup(var)))
            .map(Credential::from);

        let model = lookup("MATHFARM_AI_MODEL")
            .unwrap_or_else(|| provider.default_model().to_string());

        let temperature = match lookup("MATHFARM_AI_TEMPERATURE") {
            Some(raw) => raw.trim().parse::<f32>().map_err(|_| {
                GenerationError::config(format!("MATHFARM_AI_TEMPERATURE is not a number: '{raw}'"))
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        let max_output_tokens = match lookup("MATHFARM_AI_MAX_TOKENS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                GenerationError::config(format!(
                    "MATHFARM_AI_MAX_TOKENS is not a positive integer: '{raw}'"
                ))
            })?,
            None => DEFAULT_MAX_OUTPUT_TOKENS,
        };

        let config = Self {
            provider,
            credential,
            model,
            temperature,
            max_output_tokens,
        };
        config.validate()?;
        Ok(config)
    }
}
