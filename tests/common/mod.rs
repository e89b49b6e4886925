#![allow(dead_code)]

use mathfarm_problemgen::{
    build_prompt, prompt::SYSTEM_INSTRUCTION, Difficulty, GenerationConfig, GenerationRequest,
    ProviderKind,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MODEL: &str = "m";
pub const API_KEY: &str = "k";

/// Load test fixture from file
pub fn load_fixture(filename: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{filename}"))
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {filename}"))
}

pub fn problem_json() -> String {
    load_fixture("problem.json")
}

pub fn fenced(text: &str) -> String {
    format!("Here is your problem:\n```json\n{text}\n```\n")
}

pub fn request() -> GenerationRequest {
    GenerationRequest::new("3", "fractions", Difficulty::Medium)
}

pub fn config(kind: ProviderKind) -> GenerationConfig {
    let config = match kind {
        ProviderKind::Ollama => GenerationConfig::local(MODEL),
        _ => GenerationConfig::new(kind, API_KEY, MODEL),
    };
    config.temperature(0.7).max_output_tokens(2000)
}

/// Wrap raw model text in the provider's success envelope.
pub fn envelope(kind: ProviderKind, raw: &str) -> Value {
    match kind {
        ProviderKind::OpenAi => json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": MODEL,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": raw},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 412, "completion_tokens": 380, "total_tokens": 792}
        }),
        ProviderKind::Anthropic => json!({
            "id": "msg_123",
            "type": "message",
            "role": "assistant",
            "model": MODEL,
            "content": [{"type": "text", "text": raw}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 412, "output_tokens": 380}
        }),
        ProviderKind::Gemini => json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": raw}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 412, "candidatesTokenCount": 380, "totalTokenCount": 792}
        }),
        ProviderKind::Ollama => json!({
            "model": MODEL,
            "created_at": "2024-08-01T12:00:00Z",
            "response": raw,
            "done": true,
            "eval_count": 380,
            "total_duration": 5_000_000_000u64
        }),
    }
}

/// The exact payload each provider must send for `request()` and `config(kind)`.
pub fn expected_payload(kind: ProviderKind) -> Value {
    let prompt = build_prompt(&request());
    match kind {
        ProviderKind::OpenAi => json!({
            "model": MODEL,
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.7,
            "max_tokens": 2000
        }),
        ProviderKind::Anthropic => json!({
            "model": MODEL,
            "max_tokens": 2000,
            "messages": [{"role": "user", "content": prompt}]
        }),
        ProviderKind::Gemini => json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {"temperature": 0.7, "maxOutputTokens": 2000}
        }),
        ProviderKind::Ollama => json!({
            "model": MODEL,
            "prompt": prompt,
            "stream": false,
            "options": {"temperature": 0.7, "num_predict": 2000}
        }),
    }
}

/// Build a mock matching the provider's method, path, auth and payload.
pub fn provider_mock(kind: ProviderKind) -> wiremock::MockBuilder {
    let builder = Mock::given(method("POST"));
    let builder = match kind {
        ProviderKind::OpenAi => builder
            .and(path("/chat/completions"))
            .and(header("authorization", format!("Bearer {API_KEY}").as_str())),
        ProviderKind::Anthropic => builder
            .and(path("/messages"))
            .and(header("x-api-key", API_KEY))
            .and(header("anthropic-version", "2023-06-01")),
        ProviderKind::Gemini => builder
            .and(path(format!("/models/{MODEL}:generateContent")))
            .and(query_param("key", API_KEY)),
        ProviderKind::Ollama => builder.and(path("/api/generate")),
    };
    builder.and(body_json(expected_payload(kind)))
}

/// Mount a successful response carrying `raw` for the given provider.
pub async fn mount_success(server: &MockServer, kind: ProviderKind, raw: &str, times: u64) {
    provider_mock(kind)
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(kind, raw)))
        .expect(times)
        .mount(server)
        .await;
}
