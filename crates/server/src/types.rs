use serde::{Deserialize, Serialize};
use sumvid_llm::SummaryRequest;

use crate::rate_governor::RateLimitInfo;

/// POST /api/generate-summary body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSummaryRequest {
    pub video_data: Option<VideoData>,
}

/// Video fields as sent by the browser extension; any of them may be null
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoData {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub transcript: Option<String>,

    /// Timed transcript segments; accepted but not used for summarization
    #[serde(default)]
    pub transcript_segments: Option<serde_json::Value>,
}

impl From<VideoData> for SummaryRequest {
    fn from(data: VideoData) -> Self {
        SummaryRequest::new(
            data.title.unwrap_or_default(),
            data.description.unwrap_or_default(),
            data.transcript.unwrap_or_default(),
        )
    }
}

/// Successful summary response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: String,
    pub rate_limit_info: RateLimitInfo,
}

/// 429 response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitedResponse {
    pub success: bool,
    pub error: String,
    pub rate_limit_reached: bool,
    pub count: usize,
    pub limit: usize,
    pub wait_time: u64,
}

/// Any other failure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_data_accepts_nulls_and_segments() {
        let body = r#"{
            "videoData": {
                "title": "Intro",
                "description": null,
                "transcriptSegments": [{"start": 0, "text": "hi"}]
            }
        }"#;
        let request: GenerateSummaryRequest = serde_json::from_str(body).unwrap();
        let data = request.video_data.unwrap();
        assert!(data.transcript_segments.is_some());

        let summary_request = SummaryRequest::from(data);
        assert_eq!(summary_request, SummaryRequest::new("Intro", "", ""));
    }

    #[test]
    fn test_missing_video_data() {
        let request: GenerateSummaryRequest = serde_json::from_str("{}").unwrap();
        assert!(request.video_data.is_none());
    }

    #[test]
    fn test_response_field_names() {
        let response = RateLimitedResponse {
            success: false,
            error: "slow down".to_string(),
            rate_limit_reached: true,
            count: 3,
            limit: 3,
            wait_time: 12,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["rateLimitReached"], true);
        assert_eq!(json["waitTime"], 12);
    }
}
