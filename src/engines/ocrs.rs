//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Downloads neural network models automatically on first use.

use super::{cache_dir, download_file};
use crate::config::EngineConfig;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::preprocessing::BinaryMask;
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams};
use rten::Model;
use std::path::PathBuf;

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// OCR Engine wrapping the ocrs library
pub struct OcrsEngine {
    engine: OcrsOcrEngine,
}

impl OcrsEngine {
    /// Create a new OCR engine, downloading models if needed
    pub fn new(_config: &EngineConfig) -> Result<Self, OcrError> {
        let detection_model_path =
            ensure_model_downloaded(DETECTION_MODEL_URL, "text-detection.rten")?;
        let recognition_model_path =
            ensure_model_downloaded(RECOGNITION_MODEL_URL, "text-recognition.rten")?;

        let detection_model = Model::load_file(&detection_model_path).map_err(|e| {
            OcrError::InitializationError(format!("Failed to load detection model: {}", e))
        })?;
        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            OcrError::InitializationError(format!("Failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| {
            OcrError::InitializationError(format!("Failed to create OCR engine: {}", e))
        })?;

        tracing::info!("ocrs engine initialized successfully");

        Ok(Self { engine })
    }
}

impl OcrEngine for OcrsEngine {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies"
    }

    fn recognize(&self, mask: &BinaryMask) -> Result<String, OcrError> {
        // ocrs wants HWC bytes; expand the single channel to RGB
        let rgb_img = mask.to_dynamic().into_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            OcrError::RecognitionError(format!("Failed to create image source: {}", e))
        })?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| OcrError::RecognitionError(format!("Failed to prepare input: {}", e)))?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| OcrError::RecognitionError(format!("Failed to detect words: {}", e)))?;

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| OcrError::RecognitionError(format!("Failed to recognize text: {}", e)))?;

        let text = line_texts
            .iter()
            .filter_map(|line| line.as_ref())
            .map(|line| {
                line.words()
                    .map(|word| word.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n");

        tracing::debug!(
            "ocrs recognized {} line(s) from {}x{} mask",
            line_rects.len(),
            dimensions.0,
            dimensions.1
        );

        Ok(text)
    }
}

/// Ensure a model is downloaded to the cache directory
fn ensure_model_downloaded(url: &str, filename: &str) -> Result<PathBuf, OcrError> {
    let models_dir = cache_dir().join("models");
    std::fs::create_dir_all(&models_dir).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create models directory: {}", e))
    })?;

    let model_path = models_dir.join(filename);
    if model_path.exists() {
        tracing::info!("Using cached model {:?}", model_path);
    } else {
        tracing::info!("Downloading {} (this may take a moment)...", filename);
        download_file(url, &model_path)?;
        tracing::info!("Downloaded model to {:?}", model_path);
    }

    Ok(model_path)
}
