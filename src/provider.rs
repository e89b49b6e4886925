use crate::{GenerationError, ProviderKind};

/// A backend that turns a prompt into raw model text.
/// One call is one HTTP round trip; implementations never retry.
#[async_trait::async_trait]
pub trait LLMProvider: Send + Sync + 'static {
    /// Which backend this is.
    fn kind(&self) -> ProviderKind;

    /// Send the prompt and return the model's raw text output.
    async fn submit_prompt(&self, prompt: &str) -> Result<String, GenerationError>;
}
