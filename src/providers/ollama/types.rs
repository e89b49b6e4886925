use serde::{Deserialize, Serialize};

/// Ollama /api/generate request.
#[derive(Debug, Clone, Serialize)]
pub struct OllamaRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: OllamaOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct OllamaOptions {
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub num_predict: u32,
}

/// Ollama non-streaming response.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaResponse {
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub eval_count: Option<u32>,
    #[serde(default)]
    pub total_duration: Option<u64>,
}
