//! Router configuration.
//!
//! # Route Structure
//!
//! - `POST /v1/resize`          - Submit a resize batch (blocking or async)
//! - `GET  /v1/image/{file}`    - Retrieve a resized image
//! - `GET  /health`             - Health check: cache and in-flight counters
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Body limit** - Submit payloads are capped to keep the request path
//!   itself from exhausting memory

use axum::routing::{get, post};
use axum::{Router, extract::DefaultBodyLimit};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api::handlers::{health_handler, image_handler, resize_handler};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// `max_request_bytes` bounds the submit request body; larger payloads are
/// rejected before JSON parsing.
pub fn app_router(state: AppState, max_request_bytes: usize) -> Router {
    Router::new()
        .route(
            "/v1/resize",
            post(resize_handler).layer(DefaultBodyLimit::max(max_request_bytes)),
        )
        .route("/v1/image/{file}", get(image_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}
