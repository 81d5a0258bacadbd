//! Decoded input images
//!
//! The pipeline accepts any raster the `image` crate can decode. Color input
//! is collapsed to gray by the first binarize step, so no conversion happens
//! here.

use crate::error::OcrError;
use image::DynamicImage;

/// A decoded input image, owned by whichever pipeline stage currently holds it
pub type RasterImage = DynamicImage;

/// Decode an in-memory encoded image (PNG, JPEG, BMP, ...)
pub fn decode(bytes: &[u8]) -> Result<RasterImage, OcrError> {
    if bytes.is_empty() {
        return Err(OcrError::InvalidImage("empty input".to_string()));
    }
    let image = image::load_from_memory(bytes)
        .map_err(|e| OcrError::InvalidImage(format!("Failed to decode image: {}", e)))?;
    ensure_non_empty(&image)?;
    Ok(image)
}

/// Reject images with no pixels
pub fn ensure_non_empty(image: &RasterImage) -> Result<(), OcrError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(OcrError::InvalidImage(format!(
            "zero-area image ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}
