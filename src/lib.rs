//! Generates structured math word problems for the math-farm learning app.
//!
//! A [`GenerationRequest`] (grade, unit, difficulty) is turned into a prompt,
//! sent to one of OpenAI, Anthropic, Google Gemini or a local Ollama server,
//! and the reply is normalized into a validated [`ProblemRecord`].

pub mod client;
pub mod error;
pub mod factory;
pub mod normalize;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod types;

// Re-export core types for easy usage
pub use client::{generate, ProblemGenerationClient};
pub use error::GenerationError;
pub use factory::{Endpoints, ProviderFactory};
pub use normalize::{extract_json_block, parse_problem};
pub use prompt::build_prompt;
pub use provider::LLMProvider;
pub use providers::*;
pub use types::*;
