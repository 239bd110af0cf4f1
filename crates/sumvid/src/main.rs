use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use sumvid_common::{logger, AppConfig};
use sumvid_llm::{ChatCompletionClient, ChunkOptions, Summarizer, SummarizerOptions, SummaryRequest};

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    match find_project_root().map(|root| root.join(".env")) {
        Some(env_path) if env_path.exists() => {
            dotenv::from_path(&env_path).ok();
        }
        _ => {
            dotenv::dotenv().ok();
        }
    }
}

#[derive(Parser)]
#[command(name = "sumvid")]
#[command(about = "SumVid - rate-limited key-point summaries for video transcripts")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Summarize a transcript file once and print the result
    Summarize {
        /// Transcript text file
        #[arg(long)]
        transcript_file: PathBuf,

        /// Video title
        #[arg(long, default_value = "")]
        title: String,

        /// Video description
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(host, port).await,
        Some(Commands::Summarize {
            transcript_file,
            title,
            description,
        }) => summarize_file(transcript_file, title, description).await,
        None => serve(None, None).await,
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }
    config.validate()?;

    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("SumVid starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  LLM: {} ({})", config.llm_api_url, config.llm_model);
    tracing::info!(
        "  Rate limit: {} per {}s (charged before validation: {})",
        config.rate_limit,
        config.rate_window_secs,
        config.rate_limit_before_validation
    );

    println!("Server listening on http://{}", config.server_bind_address());

    sumvid_server::start_server(config).await?;
    Ok(())
}

async fn summarize_file(
    transcript_file: PathBuf,
    title: String,
    description: String,
) -> Result<()> {
    let config = AppConfig::from_env()?;
    config.validate()?;
    logger::setup_console_logging(&config.log_level)?;

    let transcript = tokio::fs::read_to_string(&transcript_file)
        .await
        .with_context(|| format!("Failed to read transcript {}", transcript_file.display()))?;

    let client = ChatCompletionClient::from_config(&config)?;
    tracing::info!("Summarizing {} with {}", transcript_file.display(), client.model());

    let summarizer = Summarizer::with_options(
        Arc::new(client),
        SummarizerOptions {
            chunk: ChunkOptions::new(config.chunk_size, config.chunk_overlap),
            concurrency: config.chunk_concurrency,
        },
    );

    let summary = summarizer
        .summarize(&SummaryRequest::new(title, description, transcript))
        .await?;

    tracing::info!(
        "Done - Strategy: {:?}, Chunks: {}, Language: {}",
        summary.strategy,
        summary.chunk_count,
        summary.language
    );
    println!("{}", summary.text);

    Ok(())
}
