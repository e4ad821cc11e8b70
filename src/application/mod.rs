//! Application layer: orchestration of fetch, transform, cache, and
//! single-flight admission.

pub mod services;
