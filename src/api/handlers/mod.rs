mod health;
mod image;
mod resize;

pub use health::health_handler;
pub use image::image_handler;
pub use resize::resize_handler;
