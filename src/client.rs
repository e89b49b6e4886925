//! The problem generation entry point.

use reqwest::Client;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::factory::{Endpoints, ProviderFactory};
use crate::normalize::parse_problem;
use crate::prompt::build_prompt;
use crate::types::{GenerationConfig, GenerationRequest, ProblemRecord};
use crate::GenerationError;

/// Generates problems by prompting the provider named in each call's config.
///
/// Holds no per-call state, so one instance can be cloned and shared freely.
/// There is no internal timeout; pass a `reqwest::Client` built with one, or
/// wrap `generate` in `tokio::time::timeout`.
#[derive(Debug, Clone, Default)]
pub struct ProblemGenerationClient {
    http: Client,
    endpoints: Endpoints,
}

impl ProblemGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, TLS roots).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Override provider base URLs.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Generate one problem. Either a fully validated record or an error; never retried.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            call_id = %Uuid::new_v4(),
            provider = %config.provider,
            model = %config.model,
            grade = %request.grade,
            unit = %request.unit,
            difficulty = %request.difficulty,
        )
    )]
    pub async fn generate(
        &self,
        config: &GenerationConfig,
        request: &GenerationRequest,
    ) -> Result<ProblemRecord, GenerationError> {
        let provider = ProviderFactory::create(config, &self.endpoints, self.http.clone())
            .inspect_err(|e| warn!(error = %e, "rejected generation config"))?;

        let prompt = build_prompt(request);
        let raw = provider
            .submit_prompt(&prompt)
            .await
            .inspect_err(|e| warn!(error = %e, "provider request failed"))?;

        let record = parse_problem(&raw)
            .inspect_err(|e| warn!(error = %e, raw_len = raw.len(), "could not parse problem"))?;

        info!(problem_id = %record.id, choices = record.choices.len(), "generated problem");
        Ok(record)
    }
}

/// Generate one problem with a default client.
pub async fn generate(
    config: &GenerationConfig,
    request: &GenerationRequest,
) -> Result<ProblemRecord, GenerationError> {
    ProblemGenerationClient::new().generate(config, request).await
}
