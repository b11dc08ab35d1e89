//! Ask a question against PageIndex structure files from the command line

use clap::Parser;
use pageindex_qa::{AnswerGenerator, AskRequest, ContextEngine, MockGenerator, OpenAiGenerator, QaConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ask-pageindex", version, about = "Tanya jawab dari hasil PageIndex")]
struct Args {
    /// Path ke file *_structure.json (repeatable)
    #[arg(long = "index-path", alias = "index_path")]
    index_paths: Vec<String>,

    /// Book id inside the results directory (repeatable)
    #[arg(long = "book")]
    books: Vec<String>,

    /// Pertanyaan pengguna
    #[arg(long)]
    question: String,

    /// Jumlah node teratas (override env)
    #[arg(long = "top-k", alias = "top_k")]
    top_k: Option<usize>,

    /// Model override
    #[arg(long)]
    model: Option<String>,

    /// Prefer full text over summaries in the context
    #[arg(long)]
    use_text: bool,

    /// Use the canned generator instead of a real model
    #[arg(long)]
    mock: bool,

    /// Also print which books were used
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = QaConfig::from_env()?;

    let generator: Box<dyn AnswerGenerator> = if args.mock {
        Box::new(MockGenerator::new("(mock) jawaban tidak dihasilkan oleh model"))
    } else {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("CHATGPT_API_KEY (or OPENAI_API_KEY) is not set"))?;
        Box::new(OpenAiGenerator::new(config.openai_base_url.clone(), api_key))
    };

    let engine = ContextEngine::new(generator, config);

    let request = AskRequest {
        question: args.question,
        books: Some(args.books),
        index_paths: Some(args.index_paths),
        top_k: args.top_k,
        use_summary: args.use_text.then_some(false),
        model: args.model,
    };

    let response = engine.answer(request).await?;

    println!("{}", response.answer);
    if args.verbose {
        eprintln!();
        eprintln!("Books: {}", response.used_books.join(", "));
        eprintln!("Indexes: {}", response.used_index_paths.join(", "));
    }

    Ok(())
}
