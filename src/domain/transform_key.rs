//! Deterministic identifier for a (source URL, target dimensions) pair.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable cache identifier derived from a resize request.
///
/// Derivation is pure: the same (url, width, height) triple always yields the
/// same key, across calls and across process restarts, so a repeated request
/// maps to the same cache slot. Distinct inputs yield distinct keys with
/// SHA-256 collision resistance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransformKey(String);

impl TransformKey {
    /// Derives the key for a source URL and target dimensions.
    ///
    /// The dimensions are part of the key: requesting the same image at two
    /// sizes produces two independent cache entries.
    pub fn derive(url: &str, width: u32, height: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        hasher.update(b"|");
        hasher.update(width.to_le_bytes());
        hasher.update(b"|");
        hasher.update(height.to_le_bytes());
        Self(URL_SAFE_NO_PAD.encode(hasher.finalize()))
    }

    /// Reconstructs a key from its encoded form as it appears in retrieval
    /// URLs. No validation is performed; an unknown identifier simply never
    /// matches a cache entry.
    pub fn from_encoded(encoded: &str) -> Self {
        Self(encoded.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
