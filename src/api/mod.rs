//! HTTP API layer.
//!
//! Translates HTTP requests into coordinator operations and formats
//! responses.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers

pub mod dto;
pub mod handlers;
