//! In-memory LRU cache for resized image bytes.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::domain::transform_key::TransformKey;

/// Fixed-capacity, least-recently-used store mapping [`TransformKey`] to the
/// encoded result bytes.
///
/// Entries are atomic, complete blobs with no TTL; the only way an entry
/// leaves the cache is eviction under capacity pressure. Inserting a new key
/// at capacity evicts exactly the least recently accessed entry. Safe under
/// concurrent readers and writers.
pub struct ResultCache {
    inner: Mutex<LruCache<TransformKey, Vec<u8>>>,
}

impl ResultCache {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. [`crate::config::Config::validate`] rejects
    /// a zero capacity before this is reached.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).expect("cache capacity must be > 0"),
            )),
        }
    }

    /// Returns the bytes for `key` and refreshes its recency.
    pub fn get(&self, key: &TransformKey) -> Option<Vec<u8>> {
        self.inner.lock().get(key).cloned()
    }

    /// Reports whether `key` is present without touching recency.
    pub fn contains(&self, key: &TransformKey) -> bool {
        self.inner.lock().contains(key)
    }

    /// Stores `bytes` under `key`, evicting the least recently used entry
    /// when the cache is at capacity and `key` is new.
    pub fn put(&self, key: TransformKey, bytes: Vec<u8>) {
        self.inner.lock().put(key, bytes);
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
