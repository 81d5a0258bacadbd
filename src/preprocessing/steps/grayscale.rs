use crate::raster::RasterImage;
use image::GrayImage;

/// Collapse to a single 8-bit channel
pub fn apply(image: &RasterImage) -> GrayImage {
    image.to_luma8()
}
