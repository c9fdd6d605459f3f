mod sentiment;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tweetmood_core::AppConfig;
use tweetmood_sentiment::{NluClient, SentimentError, TwitterClient};

use crate::middleware::request_id;

/// Shared, read-only handles; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub twitter: Arc<TwitterClient>,
    pub nlu: Arc<NluClient>,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "search_api_error" | "analysis_api_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_upstream_error(request_id: String, error: &SentimentError) -> ApiError {
    tracing::error!(error = %error, request_id = %request_id, "upstream call failed");
    let message = match error {
        SentimentError::SearchApi(_) => "tweet search failed",
        SentimentError::AnalysisApi(_) => "text analysis failed",
    };
    ApiError::new(request_id, error.code(), message)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

/// Routes: the JSON API plus static assets at `/`, `/css` and `/js`.
pub fn build_app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let js_dir = state.config.js_dir.clone();

    Router::new()
        .route("/api/health", get(health))
        .route("/api/sentiment", get(sentiment::get_sentiment))
        .nest_service("/css", ServeDir::new(&static_dir))
        .nest_service("/js", ServeDir::new(&js_dir))
        .fallback_service(ServeDir::new(&static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
