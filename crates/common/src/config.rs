use crate::error::SumVidError;
use crate::logger::parse_log_level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// SumVid application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Chat-completion endpoint URL
    pub llm_api_url: String,

    /// Bearer token for the chat-completion endpoint
    #[serde(skip_serializing)]
    pub llm_api_key: String,

    /// Model identifier sent with every completion request
    pub llm_model: String,

    /// Sampling temperature
    pub llm_temperature: f32,

    /// HTTP timeout for a single completion call
    pub llm_timeout_secs: u64,

    /// Maximum summaries per caller within the window
    pub rate_limit: usize,

    /// Sliding window length
    pub rate_window_secs: u64,

    /// Charge the caller's quota before the request body is validated
    pub rate_limit_before_validation: bool,

    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    pub chunk_overlap: usize,

    /// Chunk calls allowed in flight at once (1 = sequential)
    pub chunk_concurrency: usize,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            llm_api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            llm_api_key: String::new(),
            llm_model: "llama-3.3-70b-versatile".to_string(),
            llm_temperature: 0.7,
            llm_timeout_secs: 120,
            rate_limit: 3,
            rate_window_secs: 60,
            rate_limit_before_validation: true,
            chunk_size: 2000,
            chunk_overlap: 200,
            chunk_concurrency: 1,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, SumVidError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();
        let config = Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            llm_api_url: std::env::var("LLM_API_URL").unwrap_or(defaults.llm_api_url),
            llm_api_key: std::env::var("LLM_API_KEY")
                .or_else(|_| std::env::var("GROQ_API_KEY"))
                .unwrap_or_default(),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_temperature: Self::get_env_parsed("LLM_TEMPERATURE")
                .unwrap_or(defaults.llm_temperature),
            llm_timeout_secs: Self::get_env_parsed("LLM_TIMEOUT_SECS")
                .unwrap_or(defaults.llm_timeout_secs),
            rate_limit: Self::get_env_parsed("RATE_LIMIT").unwrap_or(defaults.rate_limit),
            rate_window_secs: Self::get_env_parsed("RATE_WINDOW_SECS")
                .unwrap_or(defaults.rate_window_secs),
            rate_limit_before_validation: Self::get_env_parsed("RATE_LIMIT_BEFORE_VALIDATION")
                .unwrap_or(defaults.rate_limit_before_validation),
            chunk_size: Self::get_env_parsed("CHUNK_SIZE").unwrap_or(defaults.chunk_size),
            chunk_overlap: Self::get_env_parsed("CHUNK_OVERLAP").unwrap_or(defaults.chunk_overlap),
            chunk_concurrency: Self::get_env_parsed("CHUNK_CONCURRENCY")
                .unwrap_or(defaults.chunk_concurrency),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        Ok(config)
    }

    /// Parse an environment variable, ignoring missing or malformed values
    fn get_env_parsed<T: FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SumVidError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(SumVidError::config(
                "LLM_API_KEY (or GROQ_API_KEY) is not set",
            ));
        }

        if !self.llm_api_url.starts_with("http://") && !self.llm_api_url.starts_with("https://") {
            return Err(SumVidError::config(
                "LLM API URL must start with http:// or https://",
            ));
        }

        if self.server_port == 0 {
            return Err(SumVidError::config("Server port cannot be 0"));
        }

        if self.rate_limit == 0 || self.rate_window_secs == 0 {
            return Err(SumVidError::config(
                "Rate limit and rate window must both be greater than 0",
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(SumVidError::config(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.chunk_concurrency == 0 {
            return Err(SumVidError::config("Chunk concurrency cannot be 0"));
        }

        if parse_log_level(&self.log_level).is_none() {
            return Err(SumVidError::config(format!(
                "Invalid LOG_LEVEL '{}' (expected trace, debug, info, warn or error)",
                self.log_level
            )));
        }

        Ok(())
    }
}
