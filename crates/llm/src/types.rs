use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// Single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model name (e.g., "llama-3.3-70b-versatile")
    pub model: String,

    /// System message followed by the user prompt
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Chat-completion response body (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice, empty if there is none
    pub fn first_content(&self) -> String {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }
}

/// Error body returned by the endpoint on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

/// Video fields submitted for summarization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub transcript: String,
}

impl SummaryRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        transcript: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            transcript: transcript.into(),
        }
    }

    /// Transcript, else description, else title; `None` when all are empty
    pub fn content_to_analyze(&self) -> Option<&str> {
        [&self.transcript, &self.description, &self.title]
            .into_iter()
            .find(|field| !field.is_empty())
            .map(String::as_str)
    }

    /// Language of all three fields taken together
    pub fn language(&self) -> Language {
        Language::detect(&format!(
            "{} {} {}",
            self.title, self.description, self.transcript
        ))
    }
}

/// How the final summary was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStrategy {
    /// Content fit in one call
    SinglePass,
    /// Content was split but produced one chunk
    SingleChunk,
    /// Chunk summaries merged by the reduce call
    Reduced,
    /// Reduce call failed or was empty; chunk summaries joined as-is
    Fallback,
}

/// Summarization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Final summary text
    pub text: String,

    /// Language the prompts were written in
    pub language: Language,

    /// Chunks sent to the model (1 on the single-pass path)
    pub chunk_count: usize,

    pub strategy: SummaryStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_priority() {
        let req = SummaryRequest::new("title", "description", "transcript");
        assert_eq!(req.content_to_analyze(), Some("transcript"));

        let req = SummaryRequest::new("title", "description", "");
        assert_eq!(req.content_to_analyze(), Some("description"));

        let req = SummaryRequest::new("title", "", "");
        assert_eq!(req.content_to_analyze(), Some("title"));

        assert_eq!(SummaryRequest::default().content_to_analyze(), None);
    }

    #[test]
    fn test_request_language_uses_all_fields() {
        let req = SummaryRequest::new("Rust 教學", "", "這是一段很長的中文字幕內容");
        assert_eq!(req.language(), Language::Zh);

        let req = SummaryRequest::new("中文", "", "an english transcript body");
        assert_eq!(req.language(), Language::En);
    }

    #[test]
    fn test_first_content_trims() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  points \n"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_content(), "points");

        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(response.first_content(), "");
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
            temperature: 0.7,
            max_tokens: 800,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 800);
    }
}
