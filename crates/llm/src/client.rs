use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use sumvid_common::{AppConfig, Result, SumVidError};
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Chat-completion API client (OpenAI-compatible, e.g. Groq)
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    client: Client,
}

impl ChatCompletionClient {
    /// Create new chat-completion client
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let api_url = api_url.into();
        let model = model.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SumVidError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("Chat-completion client initialized: {} (model: {})", api_url, model);
        Ok(Self {
            api_url,
            api_key: api_key.into(),
            model,
            temperature,
            client,
        })
    }

    /// Build a client from the application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.llm_api_url.clone(),
            config.llm_api_key.clone(),
            config.llm_model.clone(),
            config.llm_temperature,
            Duration::from_secs(config.llm_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Single completion call, no retries
    async fn chat(&self, request: &ChatCompletionRequest) -> Result<String> {
        debug!(
            "Sending chat completion - Model: {}, Prompt length: {}, Max tokens: {}",
            request.model,
            request.messages.iter().map(|m| m.content.len()).sum::<usize>(),
            request.max_tokens
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| SumVidError::upstream(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the endpoint's own message when the body carries one
            let message = response
                .json::<ApiErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
            return Err(SumVidError::upstream(message));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| SumVidError::upstream(format!("Failed to parse response: {}", e)))?;

        let content = result.first_content();
        debug!("Received chat completion - Length: {}", content.len());
        Ok(content)
    }
}

#[async_trait]
impl LlmClient for ChatCompletionClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)],
            temperature: self.temperature,
            max_tokens,
        };

        self.chat(&request).await
    }
}
