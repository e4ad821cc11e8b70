//! Resize coordination service.
//!
//! Orchestrates key derivation, the result cache, the in-flight registry, and
//! the fetch/transform collaborators behind three operations:
//!
//! - [`ResizeService::submit_batch`] - non-blocking admission, work runs in
//!   spawned tasks, callers poll the retrieval path later
//! - [`ResizeService::process_batch`] - blocking, every input settles to a
//!   final status before returning
//! - [`ResizeService::retrieve`] - bounded wait for a previously issued
//!   retrieval handle
//!
//! Per key, at most one production attempt runs system-wide: admission into
//! the registry is an atomic test-and-set, and the registry entry is released
//! on every exit path by the guard's `Drop`. On success the cache write
//! happens before the release, so a waiter woken by the release always
//! observes the cached result.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::fetcher::{FetchError, ImageFetcher};
use crate::domain::transform_key::TransformKey;
use crate::domain::transformer::{ImageTransformer, TransformError};
use crate::infrastructure::cache::ResultCache;
use crate::infrastructure::inflight::{InFlightGuard, InFlightRegistry};

/// Final classification of one input within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeStatus {
    Success,
    InProgress,
    Failure,
}

/// Per-input outcome of a batch submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub status: ResizeStatus,
    /// Retrieval handle; absent for failures.
    pub url: Option<String>,
    /// Whether the result was already cached at request time.
    pub cached: bool,
}

impl ResizeOutcome {
    fn cached(url: String) -> Self {
        Self {
            status: ResizeStatus::Success,
            url: Some(url),
            cached: true,
        }
    }

    fn success(url: String) -> Self {
        Self {
            status: ResizeStatus::Success,
            url: Some(url),
            cached: false,
        }
    }

    fn in_progress(url: String) -> Self {
        Self {
            status: ResizeStatus::InProgress,
            url: Some(url),
            cached: false,
        }
    }

    fn failure() -> Self {
        Self {
            status: ResizeStatus::Failure,
            url: None,
            cached: false,
        }
    }
}

/// Error outcomes of the retrieval path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetrieveError {
    #[error("resize is still in progress")]
    Timeout,

    #[error("no resized image exists for this identifier")]
    NotFound,
}

#[derive(Debug, Error)]
enum AttemptError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Coordinator over the shared cache and in-flight registry.
///
/// One instance is constructed at startup and shared by all request handlers;
/// the cache and registry are the only mutable state crossing attempts.
pub struct ResizeService {
    fetcher: Arc<dyn ImageFetcher>,
    transformer: Arc<dyn ImageTransformer>,
    cache: Arc<ResultCache>,
    in_flight: InFlightRegistry,
    base_url: String,
    /// Bound for the retrieval path and for joining a concurrent attempt.
    wait_timeout: Duration,
}

impl ResizeService {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        transformer: Arc<dyn ImageTransformer>,
        cache: Arc<ResultCache>,
        in_flight: InFlightRegistry,
        base_url: String,
        wait_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            transformer,
            cache,
            in_flight,
            base_url,
            wait_timeout,
        }
    }

    /// Classifies every input immediately, spawning a production attempt for
    /// each key that is neither cached nor already in flight.
    ///
    /// Never blocks on network or transform work. Fetch and transform
    /// failures are not reported here; they surface as `NotFound` on the
    /// retrieval path.
    pub fn submit_batch(&self, urls: &[String], width: u32, height: u32) -> Vec<ResizeOutcome> {
        urls.iter()
            .map(|url| {
                let key = TransformKey::derive(url, width, height);
                let handle = self.handle_url(&key);

                if self.cache.contains(&key) {
                    return ResizeOutcome::cached(handle);
                }

                if let Some(guard) = self.in_flight.try_admit(&key) {
                    self.spawn_attempt(guard, url.clone(), width, height, key);
                } else {
                    debug!("Attempt for {} already in flight, not starting another", key);
                }

                ResizeOutcome::in_progress(handle)
            })
            .collect()
    }

    /// Resolves every input to a final status before returning.
    ///
    /// All inputs are processed concurrently with each other. A key already
    /// in flight from another caller is never attempted a second time; the
    /// call joins the existing attempt and re-checks the cache once it
    /// settles.
    pub async fn process_batch(
        &self,
        urls: &[String],
        width: u32,
        height: u32,
    ) -> Vec<ResizeOutcome> {
        let attempts = urls.iter().map(|url| self.process_one(url, width, height));
        futures::future::join_all(attempts).await
    }

    async fn process_one(&self, url: &str, width: u32, height: u32) -> ResizeOutcome {
        let key = TransformKey::derive(url, width, height);
        let handle = self.handle_url(&key);

        if self.cache.contains(&key) {
            return ResizeOutcome::cached(handle);
        }

        let Some(guard) = self.in_flight.try_admit(&key) else {
            // Another caller is already producing this key; join its attempt
            // rather than starting a duplicate.
            let deadline = Instant::now() + self.wait_timeout;
            if self.wait_until_settled(&key, deadline).await && self.cache.contains(&key) {
                return ResizeOutcome::success(handle);
            }
            return ResizeOutcome::failure();
        };

        match self.run_attempt(guard, url, width, height, key).await {
            Ok(()) => ResizeOutcome::success(handle),
            Err(e) => {
                warn!("Failed to resize {}: {}", url, e);
                ResizeOutcome::failure()
            }
        }
    }

    /// Serves the bytes for a previously issued retrieval handle.
    ///
    /// While the key is in flight this waits on its completion signal, bounded
    /// by the configured timeout. Once no attempt is running, a cache miss
    /// means the attempt failed or never existed.
    ///
    /// A timed-out wait does not cancel the running attempt; it keeps going
    /// and populates the cache for later retrievals.
    pub async fn retrieve(&self, key: &TransformKey) -> Result<Vec<u8>, RetrieveError> {
        let deadline = Instant::now() + self.wait_timeout;

        loop {
            let Some(notify) = self.in_flight.subscribe(key) else {
                return self.cache.get(key).ok_or(RetrieveError::NotFound);
            };

            let notified = notify.notified();
            // The attempt may have been released between subscribing and
            // creating the future; releases after this point wake `notified`.
            if !self.in_flight.is_in_flight(key) {
                continue;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero()
                || tokio::time::timeout(remaining, notified).await.is_err()
            {
                return Err(RetrieveError::Timeout);
            }
        }
    }

    /// Entries currently held by the result cache.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Production attempts currently running.
    pub fn attempts_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Retrieval handle for a key.
    fn handle_url(&self, key: &TransformKey) -> String {
        format!(
            "{}/v1/image/{}.jpeg",
            self.base_url.trim_end_matches('/'),
            key
        )
    }

    fn spawn_attempt(
        &self,
        guard: InFlightGuard,
        url: String,
        width: u32,
        height: u32,
        key: TransformKey,
    ) {
        let fetcher = Arc::clone(&self.fetcher);
        let transformer = Arc::clone(&self.transformer);
        let cache = Arc::clone(&self.cache);

        tokio::spawn(async move {
            if let Err(e) = attempt(fetcher, transformer, cache, guard, &url, width, height, key).await
            {
                warn!("Failed to resize {}: {}", url, e);
            }
        });
    }

    async fn run_attempt(
        &self,
        guard: InFlightGuard,
        url: &str,
        width: u32,
        height: u32,
        key: TransformKey,
    ) -> Result<(), AttemptError> {
        attempt(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.transformer),
            Arc::clone(&self.cache),
            guard,
            url,
            width,
            height,
            key,
        )
        .await
    }

    /// Waits until no attempt for `key` is in flight.
    ///
    /// Returns `false` when the deadline passes first.
    async fn wait_until_settled(&self, key: &TransformKey, deadline: Instant) -> bool {
        while let Some(notify) = self.in_flight.subscribe(key) {
            let notified = notify.notified();
            if !self.in_flight.is_in_flight(key) {
                return true;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero()
                || tokio::time::timeout(remaining, notified).await.is_err()
            {
                return false;
            }
        }
        true
    }
}

/// One production attempt: fetch, transform, publish.
///
/// The guard is dropped only after the cache write, so the key is never
/// observed "settled but missing" by a waiter. On any error the guard drops
/// during unwinding of the `?`, releasing the key without a cache write.
#[allow(clippy::too_many_arguments)]
async fn attempt(
    fetcher: Arc<dyn ImageFetcher>,
    transformer: Arc<dyn ImageTransformer>,
    cache: Arc<ResultCache>,
    guard: InFlightGuard,
    url: &str,
    width: u32,
    height: u32,
    key: TransformKey,
) -> Result<(), AttemptError> {
    let source = fetcher.fetch(url).await?;
    let resized = transformer.resize(source, width, height).await?;

    cache.put(key, resized);
    drop(guard);

    Ok(())
}
