use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use sumvid_common::{Result, SumVidError};
use tracing::{debug, info, warn};

use crate::chunking::{split_text, ChunkOptions, TextChunk};
use crate::language::Language;
use crate::llm_trait::LlmClient;
use crate::types::{Summary, SummaryRequest, SummaryStrategy};

/// Token budget for the single-pass call
pub const SINGLE_MAX_TOKENS: u32 = 1000;
/// Token budget per chunk call
pub const CHUNK_MAX_TOKENS: u32 = 800;
/// Token budget for the reduce call
pub const REDUCE_MAX_TOKENS: u32 = 1500;

/// Summarizer tuning
#[derive(Debug, Clone, Copy)]
pub struct SummarizerOptions {
    pub chunk: ChunkOptions,

    /// Chunk calls in flight at once; results are always joined in index order
    pub concurrency: usize,
}

impl Default for SummarizerOptions {
    fn default() -> Self {
        Self {
            chunk: ChunkOptions::default(),
            concurrency: 1,
        }
    }
}

/// Key-point summarizer using a map-reduce strategy for long content
pub struct Summarizer {
    client: Arc<dyn LlmClient>,
    options: SummarizerOptions,
}

impl Summarizer {
    /// Create new summarizer
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self::with_options(client, SummarizerOptions::default())
    }

    pub fn with_options(client: Arc<dyn LlmClient>, options: SummarizerOptions) -> Self {
        Self {
            client,
            options: SummarizerOptions {
                concurrency: options.concurrency.max(1),
                ..options
            },
        }
    }

    /// Summarize a video's title, description and transcript
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<Summary> {
        let content = request
            .content_to_analyze()
            .ok_or(SumVidError::EmptyContent)?;

        let language = request.language();
        let content_len = content.chars().count();
        info!(
            "Starting summarization - Content length: {} chars, Language: {}",
            content_len, language
        );

        if content_len <= self.options.chunk.max_size {
            debug!("Content fits in one call, using single-pass summarization");
            return self.summarize_single(request, language).await;
        }

        // Map phase
        let chunks = split_text(content, &self.options.chunk);
        info!("Split content into {} chunks", chunks.len());

        let chunk_summaries: Vec<String> = stream::iter(chunks.iter())
            .map(|chunk| self.summarize_chunk(chunk, request, language))
            .buffered(self.options.concurrency)
            .try_collect()
            .await?;

        let chunk_count = chunk_summaries.len();
        if chunk_count == 1 {
            let text = chunk_summaries.into_iter().next().unwrap_or_default();
            return Ok(Summary {
                text,
                language,
                chunk_count,
                strategy: SummaryStrategy::SingleChunk,
            });
        }

        // Reduce phase
        let combined = chunk_summaries.join("\n\n");
        info!("Combined chunk summaries - Length: {} chars", combined.chars().count());

        let (text, strategy) = match self
            .client
            .complete(
                language.system_message(),
                &language.final_prompt(&combined),
                REDUCE_MAX_TOKENS,
            )
            .await
        {
            Ok(text) if !text.trim().is_empty() => {
                (text.trim().to_string(), SummaryStrategy::Reduced)
            }
            Ok(_) => {
                warn!("Reduce call returned no text, falling back to combined chunk summaries");
                (combined, SummaryStrategy::Fallback)
            }
            Err(e) => {
                warn!("Reduce call failed ({}), falling back to combined chunk summaries", e);
                (combined, SummaryStrategy::Fallback)
            }
        };

        Ok(Summary {
            text,
            language,
            chunk_count,
            strategy,
        })
    }

    /// Single-pass summarization for short content
    async fn summarize_single(
        &self,
        request: &SummaryRequest,
        language: Language,
    ) -> Result<Summary> {
        let context =
            language.single_context(&request.title, &request.description, &request.transcript);

        let response = self
            .client
            .complete(
                language.system_message(),
                &language.single_prompt(&context),
                SINGLE_MAX_TOKENS,
            )
            .await?;

        let text = response.trim();
        if text.is_empty() {
            return Err(SumVidError::EmptyResult);
        }

        Ok(Summary {
            text: text.to_string(),
            language,
            chunk_count: 1,
            strategy: SummaryStrategy::SinglePass,
        })
    }

    /// Summarize one chunk; an empty answer is kept as an empty summary
    async fn summarize_chunk(
        &self,
        chunk: &TextChunk,
        request: &SummaryRequest,
        language: Language,
    ) -> Result<String> {
        debug!("Summarizing chunk {}/{}", chunk.index + 1, chunk.total);

        let context = language.chunk_context(
            &chunk.text,
            chunk.index,
            chunk.total,
            &request.title,
            &request.description,
        );

        let response = self
            .client
            .complete(
                language.system_message(),
                &language.chunk_prompt(&context),
                CHUNK_MAX_TOKENS,
            )
            .await?;

        Ok(response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone)]
    struct Call {
        user_prompt: String,
        max_tokens: u32,
    }

    /// Scripted client: answers chunk calls with "summary N" and the reduce
    /// call with a configurable result
    struct ScriptedClient {
        calls: Mutex<Vec<Call>>,
        reduce: std::result::Result<String, String>,
        single: std::result::Result<String, String>,
        fail_chunk: Option<usize>,
    }

    impl ScriptedClient {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reduce: Ok("merged summary".to_string()),
                single: Ok("  single summary  ".to_string()),
                fail_chunk: None,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn complete(
            &self,
            _system_prompt: &str,
            user_prompt: &str,
            max_tokens: u32,
        ) -> Result<String> {
            let chunk_no = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(Call {
                    user_prompt: user_prompt.to_string(),
                    max_tokens,
                });
                calls.iter().filter(|c| c.max_tokens == CHUNK_MAX_TOKENS).count()
            };

            match max_tokens {
                CHUNK_MAX_TOKENS if self.fail_chunk == Some(chunk_no) => {
                    Err(SumVidError::upstream("chunk call failed"))
                }
                CHUNK_MAX_TOKENS => Ok(format!("summary {}", chunk_no)),
                REDUCE_MAX_TOKENS => self.reduce.clone().map_err(SumVidError::upstream),
                _ => self.single.clone().map_err(SumVidError::upstream),
            }
        }
    }

    fn long_request() -> SummaryRequest {
        SummaryRequest::new("Title", "Description", "word ".repeat(1000))
    }

    #[tokio::test]
    async fn test_empty_content_makes_no_calls() {
        let client = Arc::new(ScriptedClient::new());
        let summarizer = Summarizer::new(client.clone());

        let err = summarizer.summarize(&SummaryRequest::default()).await.unwrap_err();
        assert!(matches!(err, SumVidError::EmptyContent));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_short_content_single_pass() {
        let client = Arc::new(ScriptedClient::new());
        let summarizer = Summarizer::new(client.clone());

        let request = SummaryRequest::new("Rust", "Ownership basics", "hello world transcript");
        let summary = summarizer.summarize(&request).await.unwrap();

        assert_eq!(summary.text, "single summary");
        assert_eq!(summary.strategy, SummaryStrategy::SinglePass);
        assert_eq!(summary.language, Language::En);

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].max_tokens, SINGLE_MAX_TOKENS);
        assert!(calls[0].user_prompt.contains("Title: Rust"));
        assert!(calls[0].user_prompt.contains("Transcript: hello world transcript"));
    }

    #[tokio::test]
    async fn test_single_pass_empty_response_fails() {
        let mut client = ScriptedClient::new();
        client.single = Ok("   ".to_string());
        let summarizer = Summarizer::new(Arc::new(client));

        let err = summarizer
            .summarize(&SummaryRequest::new("", "", "short"))
            .await
            .unwrap_err();
        assert!(matches!(err, SumVidError::EmptyResult));
    }

    #[tokio::test]
    async fn test_single_pass_upstream_error_propagates() {
        let mut client = ScriptedClient::new();
        client.single = Err("invalid api key".to_string());
        let summarizer = Summarizer::new(Arc::new(client));

        let err = summarizer
            .summarize(&SummaryRequest::new("", "", "short"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid api key");
    }

    #[tokio::test]
    async fn test_long_content_map_reduce() {
        let client = Arc::new(ScriptedClient::new());
        let summarizer = Summarizer::new(client.clone());

        let summary = summarizer.summarize(&long_request()).await.unwrap();
        let calls = client.calls();
        let chunk_calls: Vec<_> = calls
            .iter()
            .filter(|c| c.max_tokens == CHUNK_MAX_TOKENS)
            .collect();

        assert!(summary.chunk_count >= 2);
        assert_eq!(chunk_calls.len(), summary.chunk_count);
        assert_eq!(calls.len(), summary.chunk_count + 1);
        assert_eq!(calls.last().unwrap().max_tokens, REDUCE_MAX_TOKENS);
        assert_eq!(summary.text, "merged summary");
        assert_eq!(summary.strategy, SummaryStrategy::Reduced);

        // Static context only on the first chunk
        assert!(chunk_calls[0].user_prompt.contains("Title: Title"));
        assert!(chunk_calls[0].user_prompt.contains("Video content segment 1/"));
        assert!(!chunk_calls[1].user_prompt.contains("Title: Title"));

        // Reduce prompt carries the chunk summaries in order
        let reduce_prompt = &calls.last().unwrap().user_prompt;
        assert!(reduce_prompt.contains("summary 1\n\nsummary 2"));
    }

    #[tokio::test]
    async fn test_reduce_failure_falls_back_to_joined_chunks() {
        let mut client = ScriptedClient::new();
        client.reduce = Err("reduce unavailable".to_string());
        let client = Arc::new(client);
        let summarizer = Summarizer::new(client.clone());

        let request = SummaryRequest::new("", "", "x".repeat(5000));
        let summary = summarizer.summarize(&request).await.unwrap();

        let expected = (1..=summary.chunk_count)
            .map(|i| format!("summary {}", i))
            .collect::<Vec<_>>()
            .join("\n\n");
        assert!(summary.chunk_count >= 2);
        assert_eq!(summary.text, expected);
        assert_eq!(summary.strategy, SummaryStrategy::Fallback);
        assert_eq!(client.calls().len(), summary.chunk_count + 1);
    }

    #[tokio::test]
    async fn test_reduce_empty_falls_back() {
        let mut client = ScriptedClient::new();
        client.reduce = Ok("  \n".to_string());
        let summarizer = Summarizer::new(Arc::new(client));

        let summary = summarizer.summarize(&long_request()).await.unwrap();
        assert_eq!(summary.strategy, SummaryStrategy::Fallback);
        assert!(summary.text.starts_with("summary 1\n\nsummary 2"));
    }

    #[tokio::test]
    async fn test_chunk_failure_aborts_request() {
        let mut client = ScriptedClient::new();
        client.fail_chunk = Some(2);
        let client = Arc::new(client);
        let summarizer = Summarizer::new(client.clone());

        let err = summarizer.summarize(&long_request()).await.unwrap_err();
        assert!(matches!(err, SumVidError::Upstream(_)));
        assert!(client.calls().iter().all(|c| c.max_tokens != REDUCE_MAX_TOKENS));
    }

    /// Answers "segment N" read from the chunk prompt; earlier segments
    /// answer slower, so completion order is the reverse of index order
    #[derive(Default)]
    struct ReversedLatencyClient {
        completed: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl LlmClient for ReversedLatencyClient {
        async fn complete(
            &self,
            _system_prompt: &str,
            user_prompt: &str,
            max_tokens: u32,
        ) -> Result<String> {
            if max_tokens == REDUCE_MAX_TOKENS {
                return Err(SumVidError::upstream("reduce unavailable"));
            }

            let segment: u64 = user_prompt
                .split("Video content segment ")
                .nth(1)
                .and_then(|rest| rest.split('/').next())
                .and_then(|n| n.parse().ok())
                .unwrap();
            tokio::time::sleep(Duration::from_millis(300 / segment)).await;

            self.completed.lock().unwrap().push(segment);
            Ok(format!("segment {}", segment))
        }
    }

    #[tokio::test]
    async fn test_concurrent_chunks_keep_index_order() {
        let client = Arc::new(ReversedLatencyClient::default());
        let summarizer = Summarizer::with_options(
            client.clone(),
            SummarizerOptions {
                concurrency: 4,
                ..SummarizerOptions::default()
            },
        );

        let request = SummaryRequest::new("", "", "x".repeat(5000));
        let summary = summarizer.summarize(&request).await.unwrap();

        assert_eq!(*client.completed.lock().unwrap(), vec![3, 2, 1]);
        assert_eq!(summary.strategy, SummaryStrategy::Fallback);
        assert_eq!(summary.text, "segment 1\n\nsegment 2\n\nsegment 3");
    }

    #[tokio::test]
    async fn test_chinese_request_uses_chinese_prompts() {
        let client = Arc::new(ScriptedClient::new());
        let summarizer = Summarizer::new(client.clone());

        let request = SummaryRequest::new("教學影片", "", "今天我們來談談所有權與借用");
        let summary = summarizer.summarize(&request).await.unwrap();

        assert_eq!(summary.language, Language::Zh);
        assert!(client.calls()[0].user_prompt.contains("標題：教學影片"));
    }
}
