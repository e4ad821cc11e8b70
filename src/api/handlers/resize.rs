//! Handler for the batch resize endpoint.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::resize::{ResizeParams, ResizeRequest, ResizeResultItem};
use crate::error::AppError;
use crate::state::AppState;

/// Submits a batch of images for resizing.
///
/// # Endpoint
///
/// `POST /v1/resize?async={true|false}`
///
/// # Modes
///
/// - `async=true` - classifies every input immediately as `success` (already
///   cached) or `inProgress`, with the resize running in the background; the
///   returned `url` is polled later for the bytes.
/// - default - waits for every input to settle and reports `success` or
///   `failure` inline.
///
/// Inputs are independent: one failing URL does not affect the others, and a
/// URL already being resized by a concurrent request is never fetched twice.
///
/// # Request Body
///
/// ```json
/// {
///   "urls": ["http://example.com/a.jpg"],
///   "width": 100,
///   "height": 0
/// }
/// ```
///
/// A `width` or `height` of 0 preserves the aspect ratio.
///
/// # Errors
///
/// Returns 400 Bad Request when the payload fails validation. Per-input
/// fetch/transform failures are reported in the items, not as an HTTP error.
pub async fn resize_handler(
    State(state): State<AppState>,
    Query(params): Query<ResizeParams>,
    Json(payload): Json<ResizeRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let outcomes = if params.asynchronous {
        state
            .resize_service
            .submit_batch(&payload.urls, payload.width, payload.height)
    } else {
        state
            .resize_service
            .process_batch(&payload.urls, payload.width, payload.height)
            .await
    };

    let items: Vec<ResizeResultItem> = outcomes.into_iter().map(Into::into).collect();

    Ok((StatusCode::CREATED, Json(items)))
}
