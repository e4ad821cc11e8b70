//! # Image Resizer
//!
//! A batch image resizing service built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Transform keys and collaborator traits
//! - **Application Layer** ([`application`]) - The resize coordinator
//! - **Infrastructure Layer** ([`infrastructure`]) - LRU cache, in-flight
//!   registry, HTTP fetcher, JPEG pipeline
//! - **API Layer** ([`api`]) - HTTP handlers and DTOs
//!
//! ## Features
//!
//! - Batch submission with blocking and fire-and-forget modes
//! - Single-flight deduplication: at most one fetch/resize per
//!   (url, dimensions) pair at any time, system-wide
//! - Bounded LRU result cache shared by both modes and the retrieval path
//! - Notification-based retrieval with a bounded wait
//!
//! ## Quick Start
//!
//! ```bash
//! # All configuration is optional; see the config module for variables
//! export LISTEN="0.0.0.0:8080"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        ResizeOutcome, ResizeService, ResizeStatus, RetrieveError,
    };
    pub use crate::domain::transform_key::TransformKey;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
