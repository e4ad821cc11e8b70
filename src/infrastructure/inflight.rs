//! Single-flight registry for running production attempts.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::transform_key::TransformKey;

/// Tracks the keys whose production attempt is currently running.
///
/// The registry is the sole source of truth for "is someone already producing
/// this key". Admission is an atomic test-and-set under one lock, so two
/// callers can never both observe "not in flight" and both start work.
///
/// A successful admission returns an [`InFlightGuard`] that removes the key
/// and wakes all waiters when dropped. Tying release to `Drop` makes it
/// unconditional: early returns, `?` propagation, and panics inside an attempt
/// all still clear the marker, so a failed attempt can never leave its key
/// stuck in-flight.
#[derive(Clone, Default)]
pub struct InFlightRegistry {
    inner: Arc<Mutex<HashMap<TransformKey, Arc<Notify>>>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` in-flight if no attempt is already running for it.
    ///
    /// Returns `None` when the key is already in flight.
    pub fn try_admit(&self, key: &TransformKey) -> Option<InFlightGuard> {
        let mut inner = self.inner.lock();
        if inner.contains_key(key) {
            return None;
        }
        inner.insert(key.clone(), Arc::new(Notify::new()));
        Some(InFlightGuard {
            registry: self.clone(),
            key: key.clone(),
        })
    }

    pub fn is_in_flight(&self, key: &TransformKey) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Returns the completion signal for `key`, or `None` when no attempt is
    /// running.
    ///
    /// The signal fires via `notify_waiters` on release. Callers must create
    /// the `notified()` future and then re-check [`Self::is_in_flight`] before
    /// awaiting, so a release landing between the two calls is not missed.
    pub fn subscribe(&self, key: &TransformKey) -> Option<Arc<Notify>> {
        self.inner.lock().get(key).cloned()
    }

    /// Number of attempts currently in flight.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Removes `key` and wakes every waiter. Idempotent.
    fn release(&self, key: &TransformKey) {
        if let Some(notify) = self.inner.lock().remove(key) {
            notify.notify_waiters();
        }
    }
}

/// Scoped in-flight marker; releases its key when dropped.
pub struct InFlightGuard {
    registry: InFlightRegistry,
    key: TransformKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.release(&self.key);
    }
}
