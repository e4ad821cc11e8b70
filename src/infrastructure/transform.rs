//! JPEG resize pipeline backed by the `image` crate.

use std::io::Cursor;

use async_trait::async_trait;
use image::ImageFormat;
use image::imageops::FilterType;

use crate::domain::transformer::{ImageTransformer, TransformError};

/// Decodes a JPEG, resizes it with Lanczos3, and re-encodes it as JPEG.
///
/// The pixel work runs under [`tokio::task::spawn_blocking`] so a large image
/// never stalls the async executor, and no shared lock is held while it runs.
#[derive(Default)]
pub struct JpegTransformer;

impl JpegTransformer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageTransformer for JpegTransformer {
    async fn resize(
        &self,
        data: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, TransformError> {
        tokio::task::spawn_blocking(move || resize_jpeg(&data, width, height))
            .await
            .map_err(|e| TransformError::Task(e.to_string()))?
    }
}

fn resize_jpeg(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, TransformError> {
    let img = image::load_from_memory_with_format(data, ImageFormat::Jpeg)
        .map_err(|e| TransformError::Decode(e.to_string()))?;

    let (w, h) = target_dimensions(img.width(), img.height(), width, height)?;
    let resized = img.resize_exact(w, h, FilterType::Lanczos3);

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, ImageFormat::Jpeg)
        .map_err(|e| TransformError::Encode(e.to_string()))?;

    Ok(out.into_inner())
}

/// Resolves the output dimensions, scaling by the source aspect ratio when one
/// target dimension is zero. Scaled dimensions are clamped to at least 1 pixel.
fn target_dimensions(
    src_w: u32,
    src_h: u32,
    width: u32,
    height: u32,
) -> Result<(u32, u32), TransformError> {
    match (width, height) {
        (0, 0) => Err(TransformError::InvalidDimensions { width, height }),
        (0, h) => {
            let w = (src_w as u64 * h as u64) / src_h.max(1) as u64;
            Ok((w.max(1) as u32, h))
        }
        (w, 0) => {
            let h = (src_h as u64 * w as u64) / src_w.max(1) as u64;
            Ok((w, h.max(1) as u32))
        }
        (w, h) => Ok((w, h)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 16) as u8, (y * 16) as u8, 128])
        });
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Jpeg)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_target_dimensions_explicit() {
        assert_eq!(target_dimensions(800, 600, 100, 50).unwrap(), (100, 50));
    }

    #[test]
    fn test_target_dimensions_preserve_aspect_ratio() {
        assert_eq!(target_dimensions(800, 600, 400, 0).unwrap(), (400, 300));
        assert_eq!(target_dimensions(800, 600, 0, 300).unwrap(), (400, 300));
    }

    #[test]
    fn test_target_dimensions_never_zero() {
        // Extreme downscale of a wide image still yields a 1px height.
        assert_eq!(target_dimensions(1000, 2, 10, 0).unwrap(), (10, 1));
    }

    #[test]
    fn test_target_dimensions_rejects_zero_by_zero() {
        assert!(matches!(
            target_dimensions(800, 600, 0, 0),
            Err(TransformError::InvalidDimensions { .. })
        ));
    }

    #[tokio::test]
    async fn test_resize_produces_decodable_jpeg_at_target_size() {
        let source = sample_jpeg(16, 8);

        let resized = JpegTransformer::new().resize(source, 8, 4).await.unwrap();

        let img = image::load_from_memory_with_format(&resized, ImageFormat::Jpeg).unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));
    }

    #[tokio::test]
    async fn test_resize_with_zero_height_keeps_aspect() {
        let source = sample_jpeg(16, 8);

        let resized = JpegTransformer::new().resize(source, 8, 0).await.unwrap();

        let img = image::load_from_memory_with_format(&resized, ImageFormat::Jpeg).unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));
    }

    #[tokio::test]
    async fn test_resize_rejects_non_jpeg_input() {
        let result = JpegTransformer::new()
            .resize(b"not an image".to_vec(), 8, 8)
            .await;

        assert!(matches!(result, Err(TransformError::Decode(_))));
    }
}
