// explain-service-rs/src/lib.rs
// Code Explainer Gateway - HTTP entry point for the explain pipeline
//
// Implements:
// - POST /api/explain: forwards a code snippet through the pipeline
// - GET /api/explain: informational fallback for browsers
// - GET /api/health: operator diagnostics (never leaks the credential)
// - Permissive CORS with a 204 preflight, stamped on every response
// - One unified error schema for every pipeline failure mode

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use provider_sdk::{ExplainError, ExplainPipeline};


// Track service start time for uptime reporting
static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ExplainPipeline>,
}

impl AppState {
    pub fn new(pipeline: ExplainPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub service_name: String,
    pub uptime_seconds: i64,
    pub provider: String,
    pub has_credential: bool,
}

/// Build the router with all routes and middleware
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/explain", post(explain_handler).get(explain_info))
        .route("/api/health", get(health_handler))
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS middleware.
///
/// Short-circuits OPTIONS with an empty 204 carrying the full allow set,
/// and stamps the allow-origin header on every other response.
/// tower-http's CorsLayer answers preflights with 200, so this stays a
/// hand-rolled middleware to keep the preflight contract at 204.
async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        return response;
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// POST /api/explain
///
/// An unparseable or absent body is treated as an absent body, which the
/// pipeline rejects as invalid input.
async fn explain_handler(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);

    match state.pipeline.explain(&body).await {
        Ok(explanation) => {
            (StatusCode::OK, Json(json!({ "explanation": explanation }))).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// GET /api/explain
async fn explain_info() -> impl IntoResponse {
    Json(json!({ "message": "POST { code } to this endpoint" }))
}

/// GET /api/health
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        healthy: true,
        service_name: "explain-service-rs".to_string(),
        uptime_seconds: START_TIME.elapsed().as_secs() as i64,
        provider: state.pipeline.provider().to_string(),
        has_credential: state.pipeline.has_credential(),
    })
}

/// Map a pipeline failure onto the unified error schema.
fn error_response(err: &ExplainError) -> Response {
    let (status, body) = match err {
        ExplainError::InvalidInput(reason) => {
            tracing::warn!("rejected explain request: {}", reason);
            (
                StatusCode::BAD_REQUEST,
                json!({ "error": "No code provided" }),
            )
        }
        ExplainError::MissingCredential(env_var) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": format!("Missing {}", env_var) }),
        ),
        ExplainError::UpstreamTimeout { provider, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": format!("{} request failed", provider),
                "message": format!("{} request timed out", provider),
            }),
        ),
        ExplainError::UpstreamTransport { provider, message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": format!("{} request failed", provider),
                "message": message,
            }),
        ),
        ExplainError::UpstreamApplication { provider, message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": format!("{} API Error", provider),
                "details": message,
            }),
        ),
        ExplainError::Internal(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Backend error", "message": message }),
        ),
    };

    if status.is_server_error() {
        tracing::error!("explain request failed: {}", err);
    }

    (status, Json(body)).into_response()
}
