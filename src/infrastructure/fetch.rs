//! HTTP source image fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::fetcher::{FetchError, ImageFetcher};

/// Fetches source images over HTTP(S) with a hard response-size ceiling.
///
/// The body is read in chunks and the download aborts as soon as the
/// accumulated size would exceed the ceiling, so an unbounded response never
/// buffers fully in memory. One attempt per call; no retries.
pub struct HttpFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpFetcher {
    /// Builds the fetcher with a per-request timeout and a body-size ceiling.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(max_bytes: usize, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("image-resizer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, max_bytes })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Reject early when the origin declares an oversized body.
        if let Some(len) = response.content_length()
            && len > self.max_bytes as u64
        {
            return Err(FetchError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?
        {
            if data.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            data.extend_from_slice(&chunk);
        }

        debug!("Fetched {} bytes from {}", data.len(), url);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::{Body, Bytes};
    use axum::http::StatusCode;
    use axum::routing::get;
    use futures::stream;

    /// Serves `router` on an ephemeral local port, returning its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fetcher(max_bytes: usize) -> HttpFetcher {
        HttpFetcher::new(max_bytes, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_at_exactly_the_ceiling() {
        let router = Router::new().route("/img", get(|| async { vec![7u8; 64] }));
        let base = serve(router).await;

        let body = fetcher(64).fetch(&format!("{base}/img")).await.unwrap();

        assert_eq!(body, vec![7u8; 64]);
    }

    #[tokio::test]
    async fn test_fetch_rejects_body_declared_over_the_ceiling() {
        // A fixed body carries Content-Length, so the download is refused
        // before any bytes are read.
        let router = Router::new().route("/img", get(|| async { vec![0u8; 65] }));
        let base = serve(router).await;

        let result = fetcher(64).fetch(&format!("{base}/img")).await;

        assert!(matches!(result, Err(FetchError::TooLarge { limit: 64 })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_oversized_streamed_body() {
        // Chunked responses carry no Content-Length; the ceiling must trip
        // during accumulation instead.
        let router = Router::new().route(
            "/img",
            get(|| async {
                let chunks = (0..4).map(|_| Ok::<_, std::io::Error>(Bytes::from(vec![0u8; 32])));
                Body::from_stream(stream::iter(chunks))
            }),
        );
        let base = serve(router).await;

        let result = fetcher(100).fetch(&format!("{base}/img")).await;

        assert!(matches!(result, Err(FetchError::TooLarge { limit: 100 })));
    }

    #[tokio::test]
    async fn test_fetch_reports_non_success_status() {
        let router = Router::new().route(
            "/img",
            get(|| async { (StatusCode::NOT_FOUND, "no such image") }),
        );
        let base = serve(router).await;

        let result = fetcher(64).fetch(&format!("{base}/img")).await;

        assert!(matches!(result, Err(FetchError::Status(404))));
    }
}
