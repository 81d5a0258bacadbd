use crate::error::OcrError;
use image::{DynamicImage, GrayImage};

/// Gray level of ink pixels in a finished mask
pub const INK: u8 = 0;
/// Gray level of background pixels in a finished mask
pub const PAPER: u8 = 255;

/// Two-valued image handed to the recognizer: black ink on white paper.
///
/// Every pixel is either [`INK`] or [`PAPER`]. Masks are only produced by the
/// binarizer or by [`BinaryMask::from_gray`], which checks that invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    /// Wrap a buffer the binarizer has already restricted to two levels
    pub(crate) fn from_binarized(image: GrayImage) -> Self {
        debug_assert!(image.pixels().all(|p| p.0[0] == INK || p.0[0] == PAPER));
        Self { image }
    }

    /// Wrap an existing two-level gray image
    pub fn from_gray(image: GrayImage) -> Result<Self, OcrError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(OcrError::InvalidImage("zero-area mask".to_string()));
        }
        if let Some((x, y, p)) = image
            .enumerate_pixels()
            .find(|(_, _, p)| p.0[0] != INK && p.0[0] != PAPER)
        {
            return Err(OcrError::InvalidImage(format!(
                "pixel ({}, {}) has intermediate value {}",
                x, y, p.0[0]
            )));
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y).0[0] == INK
    }

    pub fn ink_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[0] == INK).count()
    }

    /// True when the mask carries no ink at all
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[0] == PAPER)
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageLuma8(self.image.clone())
    }
}
