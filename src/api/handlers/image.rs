//! Handler for resized image retrieval.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;

use crate::application::services::RetrieveError;
use crate::domain::transform_key::TransformKey;
use crate::error::AppError;
use crate::state::AppState;

/// Serves a resized image by its retrieval identifier.
///
/// # Endpoint
///
/// `GET /v1/image/{id}.jpeg`
///
/// While the resize is still running, the request waits on its completion,
/// bounded by the configured poll timeout.
///
/// # Errors
///
/// - 404 Not Found - no such identifier, or the resize attempt failed
/// - 408 Request Timeout - the resize did not finish within the wait bound
pub async fn image_handler(
    Path(file): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let Some(id) = file.strip_suffix(".jpeg") else {
        return Err(AppError::not_found(
            "No image with such id is available",
            json!({ "file": file }),
        ));
    };

    debug!("Retrieving image {}", id);
    let key = TransformKey::from_encoded(id);

    match state.resize_service.retrieve(&key).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes)),
        Err(RetrieveError::Timeout) => Err(AppError::timeout(
            "Resize is still in progress",
            json!({ "id": id }),
        )),
        Err(RetrieveError::NotFound) => Err(AppError::not_found(
            "No image with such id is available",
            json!({ "id": id }),
        )),
    }
}
