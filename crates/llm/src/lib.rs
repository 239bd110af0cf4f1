//! SumVid LLM Integration
//!
//! Language detection, chunking, prompt templates, the chat-completion
//! client and the map-reduce key-point summarizer

mod chunking;
mod client;
mod language;
mod llm_trait;
mod prompts;
mod summarize;
mod types;

pub use chunking::{split, split_text, ChunkOptions, TextChunk};
pub use client::ChatCompletionClient;
pub use language::Language;
pub use llm_trait::LlmClient;
pub use summarize::{
    Summarizer, SummarizerOptions, CHUNK_MAX_TOKENS, REDUCE_MAX_TOKENS, SINGLE_MAX_TOKENS,
};
pub use types::{ChatMessage, Summary, SummaryRequest, SummaryStrategy};
