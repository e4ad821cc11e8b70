mod resize_service;

pub use resize_service::{ResizeOutcome, ResizeService, ResizeStatus, RetrieveError};
