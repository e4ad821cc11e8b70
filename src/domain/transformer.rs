//! Image transformation interface.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the decode/resize/encode pipeline.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode resized image: {0}")]
    Encode(String),

    #[error("invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("resize task failed: {0}")]
    Task(String),
}

/// Interface for the decode + resize + re-encode step.
///
/// A `width` or `height` of 0 preserves the aspect ratio by scaling from the
/// other dimension; both 0 is invalid. Implementations may be CPU-bound and
/// must not hold any shared lock while running.
///
/// # Implementations
///
/// - [`crate::infrastructure::transform::JpegTransformer`] - `image`-crate JPEG pipeline
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageTransformer: Send + Sync {
    /// Produces re-encoded bytes for `data` resized to the target dimensions.
    async fn resize(
        &self,
        data: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, TransformError>;
}
