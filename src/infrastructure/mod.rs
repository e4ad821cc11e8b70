//! Infrastructure layer for shared state and external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Bounded LRU store for resized image bytes
//! - [`inflight`] - Single-flight registry for running production attempts
//! - [`fetch`] - HTTP source fetcher
//! - [`transform`] - JPEG resize pipeline

pub mod cache;
pub mod fetch;
pub mod inflight;
pub mod transform;
