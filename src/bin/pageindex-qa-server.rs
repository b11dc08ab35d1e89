//! PageIndex QA HTTP server binary

use pageindex_qa::{AnswerGenerator, ContextEngine, MockGenerator, OpenAiGenerator, QaConfig};
use tracing_subscriber::EnvFilter;

mod server {
    pub use pageindex_qa::server::*;
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    println!("PageIndex QA server");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let config = QaConfig::from_env()?;

    // Check for --mock flag
    let use_mock = std::env::args().any(|arg| arg == "--mock");

    let generator: Box<dyn AnswerGenerator> = if use_mock {
        println!("✓ Mode: MOCK generator (answers are canned)");
        Box::new(MockGenerator::new("(mock) jawaban tidak dihasilkan oleh model"))
    } else {
        let Some(api_key) = config.openai_api_key.clone() else {
            eprintln!("❌ CHATGPT_API_KEY (or OPENAI_API_KEY) is not set");
            eprintln!("   Set it in the environment or .env, or run with --mock");
            anyhow::bail!("missing API key");
        };
        println!("✓ Mode: chat completions at {}", config.openai_base_url);
        println!("✓ Model: {}", config.model);
        Box::new(OpenAiGenerator::new(config.openai_base_url.clone(), api_key))
    };

    println!("✓ Results dir: {}", config.results_dir.display());
    println!("✓ Default top_k: {}, body: {:?}", config.top_k, config.body_source);

    let port = config.port;
    let engine = ContextEngine::new(generator, config);

    println!("✓ Starting HTTP server on port {}...", port);
    println!();

    server::run_server(engine, port).await?;

    Ok(())
}
