//! Generate one problem with the provider configured in the environment.
//!
//! ```text
//! MATHFARM_AI_PROVIDER=ollama cargo run --example generate_problem -- 4 multiplication hard
//! ```

use mathfarm_problemgen::{Difficulty, GenerationConfig, GenerationRequest, ProblemGenerationClient};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,mathfarm_problemgen=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let grade = args.next().unwrap_or_else(|| "3".to_string());
    let unit = args.next().unwrap_or_else(|| "fractions".to_string());
    let difficulty: Difficulty = args.next().as_deref().unwrap_or("medium").parse()?;

    let config = GenerationConfig::from_env()?;
    let request = GenerationRequest::new(grade, unit, difficulty);

    println!("🚜 Generating a {difficulty} problem with {} ({})", config.provider, config.model);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()?;
    let client = ProblemGenerationClient::new().with_http_client(http);
    let problem = client.generate(&config, &request).await?;

    println!("\n{}\n", problem.stem);
    for choice in &problem.choices {
        println!("  {}. {}", choice.label, choice.text);
    }
    println!("\nAnswer: {}", problem.answer);
    for (i, step) in problem.solution.steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    Ok(())
}
