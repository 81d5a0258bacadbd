#![allow(dead_code)]

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use underline_ocr::{BinaryMask, OcrEngine, OcrError};

pub const WHITE: u8 = 255;
pub const BLACK: u8 = 0;

/// Engine that returns canned text and counts how often it was called
pub struct CannedEngine {
    pub text: String,
    pub calls: AtomicUsize,
}

impl CannedEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrEngine for CannedEngine {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn description(&self) -> &'static str {
        "returns fixed text"
    }

    fn recognize(&self, mask: &BinaryMask) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(
            mask.as_gray().pixels().all(|p| p.0[0] == 0 || p.0[0] == 255),
            "engine received a non-binary image"
        );
        Ok(self.text.clone())
    }
}

/// Engine that always fails with the given error
pub struct FailingEngine(pub fn() -> OcrError);

impl OcrEngine for FailingEngine {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn description(&self) -> &'static str {
        "always fails"
    }

    fn recognize(&self, _mask: &BinaryMask) -> Result<String, OcrError> {
        Err((self.0)())
    }
}

pub fn blank_page(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([WHITE]))
}

pub fn fill(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Luma([value]));
        }
    }
}

/// Block letter "H": 20 wide, 30 tall, 3 px strokes, top-left at (x, y)
pub fn draw_h(img: &mut GrayImage, x: u32, y: u32) {
    fill(img, x, y, x + 3, y + 30, BLACK);
    fill(img, x + 17, y, x + 20, y + 30, BLACK);
    fill(img, x, y + 14, x + 20, y + 17, BLACK);
}

/// Three "H" glyphs at y 20..50 with a 2 px underline at y 54..56, x 15..125
pub fn underlined_word() -> GrayImage {
    let mut img = blank_page(140, 70);
    for i in 0..3 {
        draw_h(&mut img, 20 + i * 35, 20);
    }
    fill(&mut img, 15, 54, 125, 56, BLACK);
    img
}

/// Same glyphs, but the underline at y 50..52 touches the bottom of every stroke
pub fn fused_underline_word() -> GrayImage {
    let mut img = blank_page(140, 70);
    for i in 0..3 {
        draw_h(&mut img, 20 + i * 35, 20);
    }
    fill(&mut img, 15, 50, 125, 52, BLACK);
    img
}

pub fn png_bytes(img: &GrayImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(img.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}
