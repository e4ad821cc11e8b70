//! DTOs for the resize endpoint.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use crate::application::services::{ResizeOutcome, ResizeStatus};

/// Upper bound on a single target dimension; keeps one entry's decoded
/// output bounded.
const MAX_DIMENSION: u32 = 8192;

/// Request to resize one or more source images to a common target size.
///
/// A `width` or `height` of 0 preserves the aspect ratio by scaling from the
/// other dimension; both 0 is rejected.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_dimensions"))]
pub struct ResizeRequest {
    #[validate(length(min = 1, message = "At least one URL is required"))]
    #[validate(custom(function = "validate_urls"))]
    pub urls: Vec<String>,

    #[validate(range(max = MAX_DIMENSION))]
    pub width: u32,

    #[validate(range(max = MAX_DIMENSION))]
    pub height: u32,
}

/// Query parameters selecting the submission mode.
#[derive(Debug, Default, Deserialize)]
pub struct ResizeParams {
    /// When true, inputs are admitted without waiting for the resize to
    /// finish; results are fetched later via the retrieval URL.
    #[serde(default, rename = "async")]
    pub asynchronous: bool,
}

/// Per-input result record, in the original wire shape.
#[derive(Debug, Serialize)]
pub struct ResizeResultItem {
    pub result: ResizeResultStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub cached: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ResizeResultStatus {
    Success,
    InProgress,
    Failure,
}

impl From<ResizeOutcome> for ResizeResultItem {
    fn from(outcome: ResizeOutcome) -> Self {
        let result = match outcome.status {
            ResizeStatus::Success => ResizeResultStatus::Success,
            ResizeStatus::InProgress => ResizeResultStatus::InProgress,
            ResizeStatus::Failure => ResizeResultStatus::Failure,
        };

        Self {
            result,
            url: outcome.url,
            cached: outcome.cached,
        }
    }
}

fn validate_urls(urls: &Vec<String>) -> Result<(), ValidationError> {
    for raw in urls {
        let parsed = Url::parse(raw).map_err(|_| {
            let mut err = ValidationError::new("invalid_url");
            err.message = Some("Invalid URL format".into());
            err
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            let mut err = ValidationError::new("invalid_url_scheme");
            err.message = Some("URL must use http or https".into());
            return Err(err);
        }
    }
    Ok(())
}

fn validate_dimensions(request: &ResizeRequest) -> Result<(), ValidationError> {
    if request.width == 0 && request.height == 0 {
        let mut err = ValidationError::new("zero_dimensions");
        err.message = Some("width and height cannot both be zero".into());
        return Err(err);
    }
    Ok(())
}
