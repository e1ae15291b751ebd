use anyhow::Result;
use askdoc_application::SessionUseCase;
use askdoc_interaction::{DEFAULT_GEMINI_MODEL, GeminiAnswerEngine, GeminiFileStore};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

mod repl;

#[derive(Parser)]
#[command(name = "askdoc")]
#[command(
    about = "Upload a document and ask questions about it, processed natively by Gemini",
    long_about = None
)]
struct Cli {
    /// Gemini model to use (overrides the configured model)
    #[arg(long)]
    model: Option<String>,

    /// Document to upload before the first question
    #[arg(long)]
    file: Option<PathBuf>,

    /// Path to secret.json (defaults to ~/.config/askdoc/secret.json)
    #[arg(long)]
    secret_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdoc=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // The secret file is optional as long as the API key comes from the
    // environment.
    let secret = match &cli.secret_file {
        Some(path) => askdoc_interaction::config::load_secret_config_from(path),
        None => askdoc_interaction::load_secret_config(),
    };
    let secret = match secret {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::debug!("secret file not loaded: {e}");
            None
        }
    };
    let api_key = askdoc_interaction::resolve_api_key(secret.as_ref())?;

    let model = cli
        .model
        .or_else(|| {
            secret
                .as_ref()
                .and_then(|s| s.gemini.as_ref())
                .and_then(|g| g.model_name.clone())
        })
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

    let store = Arc::new(GeminiFileStore::new(api_key.clone())?);
    let engine = Arc::new(GeminiAnswerEngine::new(api_key, model)?);
    let session = SessionUseCase::new(store, engine);

    repl::run(session, cli.file).await
}
