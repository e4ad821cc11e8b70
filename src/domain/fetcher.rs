//! Source image fetching interface.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while fetching a source image.
///
/// Every variant is terminal for one production attempt; the coordinator
/// never retries a failed fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("non-success status: {0}")]
    Status(u16),

    #[error("response body exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
}

/// Interface for retrieving raw source bytes from a remote URL.
///
/// One attempt per call, no retries, and a hard response-size ceiling so a
/// hostile or misconfigured origin cannot exhaust memory.
///
/// # Implementations
///
/// - [`crate::infrastructure::fetch::HttpFetcher`] - reqwest-backed HTTP client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetches the full body at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] on transport failures,
    /// [`FetchError::Status`] for non-2xx responses, and
    /// [`FetchError::TooLarge`] when the body exceeds the configured ceiling.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
