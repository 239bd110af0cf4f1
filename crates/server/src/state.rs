use std::sync::Arc;
use std::time::Duration;
use sumvid_common::{AppConfig, Result};
use sumvid_llm::{ChatCompletionClient, ChunkOptions, LlmClient, Summarizer, SummarizerOptions};

use crate::rate_governor::{Clock, RateGovernor, SystemClock};

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Per-caller admission control
    pub governor: RateGovernor,

    /// Key-point summarizer
    pub summarizer: Summarizer,
}

impl AppState {
    /// Create application state talking to the configured LLM endpoint
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = ChatCompletionClient::from_config(&config)?;
        Ok(Self::with_parts(config, Arc::new(client), Arc::new(SystemClock)))
    }

    /// Create application state from explicit collaborators
    pub fn with_parts(
        config: AppConfig,
        client: Arc<dyn LlmClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let governor = RateGovernor::new(
            config.rate_limit,
            Duration::from_secs(config.rate_window_secs),
            clock,
        );

        let summarizer = Summarizer::with_options(
            client,
            SummarizerOptions {
                chunk: ChunkOptions::new(config.chunk_size, config.chunk_overlap),
                concurrency: config.chunk_concurrency,
            },
        );

        Self {
            config,
            governor,
            summarizer,
        }
    }
}
