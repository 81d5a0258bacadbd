use image::{imageops, GrayImage};

/// Flip back to black ink on white paper
pub fn apply(mut binary: GrayImage) -> GrayImage {
    imageops::invert(&mut binary);
    binary
}
