//! Image preprocessing for OCR
//!
//! Binarizes the input and strips underlines and rule lines, which otherwise
//! merge with the glyphs above them and wreck recognition.

pub mod binarizer;
pub mod mask;
pub mod steps;

pub use binarizer::{Binarization, Binarizer, StepTiming};
pub use mask::{BinaryMask, INK, PAPER};
pub use steps::lines::LineRegion;

use crate::config::BinarizeConfig;
use crate::error::OcrError;
use crate::raster::RasterImage;

/// Binarize `image` with the given tuning
pub fn binarize(image: &RasterImage, config: &BinarizeConfig) -> Result<BinaryMask, OcrError> {
    Binarizer::new(*config)?.binarize(image)
}
