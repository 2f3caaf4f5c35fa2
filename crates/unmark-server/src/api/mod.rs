mod analyze;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use unmark_core::Environment;
use unmark_scraper::{ErrorKind, MediaExtractor, ScraperError};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

pub const SUCCESS_MESSAGE: &str = "获取成功";

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<MediaExtractor>,
    pub env: Environment,
}

/// Envelope shared by every analyze response. `code` mirrors the HTTP status
/// and `data` is `null` on failure.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub data: Option<T>,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
    environment: String,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            data: Some(data),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Maps an analyzer failure onto the status callers branch on: bad input,
    /// expired content, or an upstream fetch problem.
    #[must_use]
    pub fn from_scraper(request_id: &str, error: &ScraperError) -> Self {
        let status = match error.kind() {
            ErrorKind::Input => StatusCode::BAD_REQUEST,
            ErrorKind::DeadLink => StatusCode::NOT_FOUND,
            ErrorKind::Fetch => StatusCode::BAD_GATEWAY,
        };
        if status == StatusCode::BAD_GATEWAY {
            tracing::error!(request_id, error = %error, "upstream fetch failed");
        } else {
            tracing::info!(request_id, error = %error, status = status.as_u16(), "analysis rejected");
        }
        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ApiResponse::<()> {
            code: self.status.as_u16(),
            data: None,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/analyze", post(analyze::analyze))
        .route("/analyze/douyin", post(analyze::analyze_douyin))
        .route("/analyze/xiaohongshu", post(analyze::analyze_xiaohongshu))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        timestamp: Utc::now(),
        environment: state.env.to_string(),
    })
}
