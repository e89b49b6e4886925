use thiserror::Error;

use crate::types::ProviderKind;

/// Errors that can occur while generating a problem.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("{provider} request failed{}: {cause}", status_suffix(.status))]
    TransportFailure {
        provider: ProviderKind,
        status: Option<u16>,
        cause: String,
    },

    #[error("Failed to parse generated problem: {cause}")]
    ParseFailure { cause: String },

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with HTTP {s}")).unwrap_or_default()
}

impl GenerationError {
    pub fn config(message: impl Into<String>) -> Self {
        GenerationError::Configuration(message.into())
    }

    pub fn transport(provider: ProviderKind, status: Option<u16>, cause: impl Into<String>) -> Self {
        GenerationError::TransportFailure {
            provider,
            status,
            cause: cause.into(),
        }
    }

    /// Map a reqwest failure (connect, DNS, timeout, body read) onto a transport failure.
    pub fn from_reqwest(provider: ProviderKind, err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        GenerationError::transport(provider, status, err.to_string())
    }

    pub fn parse(cause: impl Into<String>) -> Self {
        GenerationError::ParseFailure {
            cause: cause.into(),
        }
    }

    pub fn unsupported(name: impl Into<String>) -> Self {
        GenerationError::UnsupportedProvider(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_includes_status() {
        let err = GenerationError::transport(ProviderKind::OpenAi, Some(429), "rate limited");
        assert_eq!(err.to_string(), "openai request failed with HTTP 429: rate limited");

        let err = GenerationError::transport(ProviderKind::Ollama, None, "connection refused");
        assert_eq!(err.to_string(), "ollama request failed: connection refused");
    }

    #[test]
    fn test_error_creation() {
        let err = GenerationError::config("model must not be empty");
        assert!(err.to_string().contains("Invalid configuration"));

        let err = GenerationError::parse("expected value at line 1 column 1");
        assert!(err.to_string().contains("line 1 column 1"));

        let err = GenerationError::unsupported("cohere");
        assert_eq!(err.to_string(), "Unsupported provider: cohere");
    }
}
