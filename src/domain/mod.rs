//! Core domain types and collaborator interfaces.
//!
//! This layer defines the deterministic transform key plus the trait seams for
//! the two external collaborators (source fetching and image transformation).
//! Concrete implementations live in [`crate::infrastructure`].

pub mod fetcher;
pub mod transform_key;
pub mod transformer;
