/// SumVid error types
#[derive(Debug, thiserror::Error)]
pub enum SumVidError {
    /// Title, description and transcript are all empty
    #[error("No content to analyze")]
    EmptyContent,

    /// Required call to the LLM endpoint failed
    #[error("{0}")]
    Upstream(String),

    /// LLM answered but produced no usable text
    #[error("Failed to generate key point summary")]
    EmptyResult,

    /// Caller exhausted its request window
    #[error("Rate limit exceeded: {count}/{limit} requests, retry in {wait_time_seconds}s")]
    RateLimited {
        count: usize,
        limit: usize,
        wait_time_seconds: u64,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SumVidError {
    /// Create upstream (LLM endpoint) error
    pub fn upstream<S: Into<String>>(msg: S) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

impl SumVidError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyContent => 400,
            Self::InvalidInput(_) => 400,
            Self::Json(_) => 400,
            Self::RateLimited { .. } => 429,
            Self::Upstream(_) => 500,
            Self::EmptyResult => 500,
            Self::Config(_) => 500,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }
}
