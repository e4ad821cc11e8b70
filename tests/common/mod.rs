#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use image_resizer::domain::fetcher::{FetchError, ImageFetcher};
use image_resizer::domain::transformer::{ImageTransformer, TransformError};
use image_resizer::infrastructure::cache::ResultCache;
use image_resizer::infrastructure::inflight::InFlightRegistry;
use image_resizer::prelude::{ResizeService, TransformKey};
use image_resizer::routes::app_router;
use image_resizer::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080";

/// Fetcher double with a fixed response, optional delay, and a call counter.
pub struct StubFetcher {
    body: Vec<u8>,
    status: u16,
    delay: Duration,
    pub calls: Arc<AtomicUsize>,
}

impl StubFetcher {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            body,
            status: 200,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            body: Vec::new(),
            status,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn slow(body: Vec<u8>, delay: Duration) -> Self {
        Self {
            body,
            status: 200,
            delay,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.status != 200 {
            return Err(FetchError::Status(self.status));
        }
        Ok(self.body.clone())
    }
}

/// Transformer double prefixing the input with the requested dimensions.
pub struct StubTransformer;

#[async_trait]
impl ImageTransformer for StubTransformer {
    async fn resize(
        &self,
        data: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, TransformError> {
        let mut out = format!("resized-{width}x{height}:").into_bytes();
        out.extend_from_slice(&data);
        Ok(out)
    }
}

pub fn create_test_state(
    fetcher: impl ImageFetcher + 'static,
    transformer: impl ImageTransformer + 'static,
    wait_timeout: Duration,
) -> AppState {
    let service = ResizeService::new(
        Arc::new(fetcher),
        Arc::new(transformer),
        Arc::new(ResultCache::new(64)),
        InFlightRegistry::new(),
        BASE_URL.to_string(),
        wait_timeout,
    );

    AppState::new(Arc::new(service))
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state, 8 * 1024)).unwrap()
}

/// Extracts the `/v1/image/...` path from a retrieval handle.
pub fn retrieval_path(url: &str) -> String {
    url.strip_prefix(BASE_URL)
        .expect("retrieval handle should start with the base URL")
        .to_string()
}

/// Derives the retrieval path the same way the service does.
pub fn expected_path(url: &str, width: u32, height: u32) -> String {
    format!("/v1/image/{}.jpeg", TransformKey::derive(url, width, height))
}
