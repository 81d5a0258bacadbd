//! Document OCR with underline removal.
//!
//! Data flows one way: a decoded [`RasterImage`] goes through the
//! [`Binarizer`], which thresholds it and erases long horizontal rules, and
//! the resulting [`BinaryMask`] goes through the [`Recognizer`], which runs an
//! OCR engine and returns [`ExtractedText`].

pub mod cli;
pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod ocr;
pub mod preprocessing;
pub mod raster;
pub mod recognizer;
pub mod server;
pub mod source;

pub use config::{BinarizeConfig, EngineConfig, ServerConfig};
pub use engine::OcrEngine;
pub use error::OcrError;
pub use ocr::{extract_text, OcrOutput, OcrProcessor};
pub use preprocessing::{binarize, Binarizer, BinaryMask, LineRegion};
pub use raster::RasterImage;
pub use recognizer::{ExtractedText, Recognizer};
