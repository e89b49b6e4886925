//! Provider implementations for different LLM services.

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

// Re-export commonly used provider types
pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{GenerationError, ProviderKind};

const ERROR_BODY_CHARS: usize = 200;

/// Check the status and decode a provider's JSON envelope.
///
/// Non-2xx responses become `TransportFailure`; a 2xx body that does not
/// match the expected envelope becomes `ParseFailure`.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    provider: ProviderKind,
    response: reqwest::Response,
) -> Result<T, GenerationError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_else(|| truncate(&body));
        return Err(GenerationError::transport(
            provider,
            Some(status.as_u16()),
            message,
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| GenerationError::from_reqwest(provider, e))?;
    tracing::debug!(%provider, bytes = body.len(), "received response");

    serde_json::from_str(&body).map_err(|e| {
        GenerationError::parse(format!("unexpected {provider} response envelope: {e}"))
    })
}

/// Pull the human-readable message out of a provider error body.
fn extract_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorWrapper {
        error: ErrorDetail,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorDetail {
        Object { message: String },
        Text(String),
    }

    match serde_json::from_str::<ErrorWrapper>(body).ok()?.error {
        ErrorDetail::Object { message } | ErrorDetail::Text(message) => Some(message),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_CHARS).collect()
}
