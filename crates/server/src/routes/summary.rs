use actix_web::http::StatusCode;
use actix_web::{post, web, HttpRequest, HttpResponse};
use sumvid_common::{Result, SumVidError};
use sumvid_llm::{Language, Summary, SummaryRequest};
use tracing::{error, info, warn};

use crate::client_ip::client_ip;
use crate::rate_governor::Admission;
use crate::state::AppState;
use crate::types::{ErrorResponse, GenerateSummaryRequest, RateLimitedResponse, SummaryResponse};

/// Generate a key-point summary for a video
///
/// The body is read raw so admission can be charged before it is parsed,
/// matching `rate_limit_before_validation`.
#[post("/api/generate-summary")]
pub async fn generate_summary(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    let caller_id = client_ip(&req);

    match run(&state, &caller_id, &body).await {
        Ok(summary) => {
            info!(
                "Summary generated for {} - Strategy: {:?}, Chunks: {}, Length: {} chars",
                caller_id,
                summary.strategy,
                summary.chunk_count,
                summary.text.chars().count()
            );

            let rate_limit_info = state.governor.quota(&caller_id).await;
            HttpResponse::Ok().json(SummaryResponse {
                success: true,
                summary: summary.text,
                rate_limit_info,
            })
        }
        Err(e) => error_response(e),
    }
}

/// Every other method on the summary path
pub async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    warn!("Rejected {} on {}", req.method(), req.path());
    HttpResponse::MethodNotAllowed()
        .json(ErrorResponse::new(Language::default().method_not_allowed_message()))
}

async fn run(state: &AppState, caller_id: &str, body: &[u8]) -> Result<Summary> {
    let charge_first = state.config.rate_limit_before_validation;

    if charge_first {
        admit(state, caller_id).await?;
    }

    let request = parse_request(body)?;

    if !charge_first {
        admit(state, caller_id).await?;
    }

    state.summarizer.summarize(&request).await
}

async fn admit(state: &AppState, caller_id: &str) -> Result<()> {
    match state.governor.admit(caller_id).await {
        Admission::Allowed { .. } => Ok(()),
        Admission::Rejected {
            count,
            limit,
            wait_time_seconds,
        } => Err(SumVidError::RateLimited {
            count,
            limit,
            wait_time_seconds,
        }),
    }
}

fn parse_request(body: &[u8]) -> Result<SummaryRequest> {
    let payload: GenerateSummaryRequest = serde_json::from_slice(body)?;
    let video_data = payload
        .video_data
        .ok_or_else(|| SumVidError::invalid_input("Missing video data"))?;

    let request = SummaryRequest::from(video_data);
    if request.content_to_analyze().is_none() {
        return Err(SumVidError::EmptyContent);
    }

    Ok(request)
}

fn error_response(err: SumVidError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match err {
        SumVidError::RateLimited {
            count,
            limit,
            wait_time_seconds,
        } => HttpResponse::build(status).json(RateLimitedResponse {
            success: false,
            // Body is not inspected yet at admission time, so the default language is used
            error: Language::default().rate_limited_message(wait_time_seconds, count, limit),
            rate_limit_reached: true,
            count,
            limit,
            wait_time: wait_time_seconds,
        }),
        err => {
            if status.is_server_error() {
                error!("Summary generation failed: {}", err);
            } else {
                warn!("Rejected summary request: {}", err);
            }
            HttpResponse::build(status).json(ErrorResponse::new(err.to_string()))
        }
    }
}
