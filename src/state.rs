//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::ResizeService;

#[derive(Clone)]
pub struct AppState {
    pub resize_service: Arc<ResizeService>,
}

impl AppState {
    pub fn new(resize_service: Arc<ResizeService>) -> Self {
        Self { resize_service }
    }
}
