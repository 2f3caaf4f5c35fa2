use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use unmark_core::{ImageFormat, MediaResult};
use unmark_scraper::Platform;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

/// Body accepted by every analyze route. `url` carries the raw share text,
/// not necessarily a bare link.
#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    url: String,
    #[serde(default, rename = "type")]
    image_format: Option<ImageFormat>,
    #[serde(default)]
    format: Option<String>,
}

type AnalyzeResponse = Result<Json<ApiResponse<MediaResult>>, ApiError>;

pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> AnalyzeResponse {
    run_analysis(&state, &req_id, None, payload).await
}

pub(super) async fn analyze_douyin(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> AnalyzeResponse {
    run_analysis(&state, &req_id, Some(Platform::Douyin), payload).await
}

pub(super) async fn analyze_xiaohongshu(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> AnalyzeResponse {
    run_analysis(&state, &req_id, Some(Platform::Xiaohongshu), payload).await
}

async fn run_analysis(
    state: &AppState,
    req_id: &RequestId,
    platform: Option<Platform>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> AnalyzeResponse {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(request_id = %req_id.0, error = %rejection, "rejected analyze body");
        ApiError::bad_request(rejection.body_text())
    })?;

    if let Some(format) = request.format.as_deref() {
        if !format.eq_ignore_ascii_case("json") {
            return Err(ApiError::bad_request(format!(
                "unsupported response format '{format}'"
            )));
        }
    }

    let outcome = match platform {
        Some(platform) => {
            state
                .extractor
                .analyze_as(platform, &request.url, request.image_format)
                .await
        }
        None => {
            state
                .extractor
                .analyze(&request.url, request.image_format)
                .await
        }
    };

    outcome
        .map(|media| Json(ApiResponse::success(media)))
        .map_err(|e| ApiError::from_scraper(&req_id.0, &e))
}
