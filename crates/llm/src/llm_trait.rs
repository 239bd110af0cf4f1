use async_trait::async_trait;
use sumvid_common::Result;

/// Text-generation collaborator used by the summarizer
///
/// Implementations return the generated text trimmed, possibly empty.
/// Transport and HTTP failures surface as `SumVidError::Upstream`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> Result<String>;
}
