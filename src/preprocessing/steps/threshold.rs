use image::{GrayImage, Luma};

/// Level of ink pixels while the image is in inverted (ink-on) polarity
pub const ON: u8 = 255;
/// Level of background pixels while the image is in inverted polarity
pub const OFF: u8 = 0;

/// Fixed inverted binarization.
///
/// Pixels at or below `threshold` are ink and come out as [`ON`]; everything
/// lighter becomes [`OFF`]. The inversion lets the line detector treat ink
/// strokes as the set it operates on.
pub fn apply(gray: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = gray.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if gray.get_pixel(x, y).0[0] <= threshold {
            Luma([ON])
        } else {
            Luma([OFF])
        }
    })
}
