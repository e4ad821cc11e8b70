//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health with cache and in-flight counters.
///
/// # Endpoint
///
/// `GET /health`
fn count_message(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        format!("{count} {plural}")
    }
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cached = state.resize_service.cached_entries();
    let in_flight = state.resize_service.attempts_in_flight();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            cache: CheckStatus {
                status: "ok".to_string(),
                message: Some(count_message(cached, "entry", "entries")),
            },
            in_flight: CheckStatus {
                status: "ok".to_string(),
                message: Some(count_message(in_flight, "attempt running", "attempts running")),
            },
        },
    })
}
