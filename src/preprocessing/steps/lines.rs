//! Underline and rule-line suppression
//!
//! Works on the inverted binary image (ink is [`ON`]). A morphological
//! opening with a wide, flat rectangle keeps only long horizontal ink runs;
//! the outer contours of what survives are the detected lines, and each one
//! is painted over with background before the glyphs are handed on.

use super::threshold::{OFF, ON};
use crate::config::{BinarizeConfig, MAX_KERNEL_SIZE};
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask};
use imageproc::rect::Rect;

/// Bounding box of one detected horizontal line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl LineRegion {
    fn from_contour(contour: &Contour<u32>) -> Option<Self> {
        let first = contour.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &contour.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }
}

/// Detect and erase lines, returning the cleaned image and how many lines were removed
pub fn apply(binary: GrayImage, config: &BinarizeConfig) -> (GrayImage, usize) {
    let regions = detect(&binary, config);
    if regions.is_empty() {
        return (binary, 0);
    }

    let line_area: u64 = regions
        .iter()
        .map(|r| r.width as u64 * r.height as u64)
        .sum();
    let image_area = binary.width() as u64 * binary.height() as u64;
    if line_area * 2 > image_area {
        tracing::warn!(
            "Detected lines cover {}% of the image; the threshold may be too high for this scan",
            line_area * 100 / image_area
        );
    }

    tracing::debug!("Erasing {} horizontal line(s)", regions.len());
    let mut cleaned = binary;
    erase(&mut cleaned, &regions, config.erase_thickness);
    (cleaned, regions.len())
}

/// Find the regions of `binary` that survive the horizontal opening
pub fn detect(binary: &GrayImage, config: &BinarizeConfig) -> Vec<LineRegion> {
    let opened = open(
        binary,
        config.kernel_width,
        config.kernel_height,
        config.iterations,
    );

    find_contours::<u32>(&opened)
        .iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .filter_map(LineRegion::from_contour)
        .collect()
}

/// Paint each region, widened by half the stroke thickness on every side, with background
pub fn erase(binary: &mut GrayImage, regions: &[LineRegion], thickness: u32) {
    let halo = (thickness / 2) as i64;
    let (width, height) = (binary.width() as i64, binary.height() as i64);

    for region in regions {
        let x0 = (region.x as i64 - halo).max(0);
        let y0 = (region.y as i64 - halo).max(0);
        let x1 = (region.x as i64 + region.width as i64 + halo).min(width);
        let y1 = (region.y as i64 + region.height as i64 + halo).min(height);
        if x1 <= x0 || y1 <= y0 {
            continue;
        }

        // Clipped to the image, so every coordinate fits
        let (Ok(left), Ok(top)) = (i32::try_from(x0), i32::try_from(y0)) else {
            continue;
        };
        let rect = Rect::at(left, top).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(binary, rect, Luma([OFF]));
    }
}

/// Morphological opening with a `kernel_width` x `kernel_height` rectangle.
///
/// Runs `iterations` erosions followed by `iterations` dilations. Erosion
/// anchors the element at its center; dilation uses the reflected anchor so
/// that an opening never shifts a surviving run. Kernel sides are clamped to
/// [`MAX_KERNEL_SIZE`].
pub fn open(
    binary: &GrayImage,
    kernel_width: u32,
    kernel_height: u32,
    iterations: u32,
) -> GrayImage {
    let kw = kernel_width.clamp(1, MAX_KERNEL_SIZE);
    let kh = kernel_height.clamp(1, MAX_KERNEL_SIZE);
    let element = GrayImage::from_pixel(kw, kh, Luma([ON]));

    let erode_mask = Mask::from_image(&element, anchor(kw / 2), anchor(kh / 2));
    let dilate_mask =
        Mask::from_image(&element, anchor(kw - 1 - kw / 2), anchor(kh - 1 - kh / 2));

    let mut opened = binary.clone();
    for _ in 0..iterations {
        opened = grayscale_erode(&opened, &erode_mask);
    }
    for _ in 0..iterations {
        opened = grayscale_dilate(&opened, &dilate_mask);
    }
    opened
}

fn anchor(offset: u32) -> u8 {
    u8::try_from(offset).unwrap_or(u8::MAX)
}
