//! Leptess/Tesseract engine implementation
//!
//! Tesseract-based OCR engine. Copes better with noisy phone photos.
//! Uses tesseract-static crate for static linking (no system dependencies).
//! Downloads tessdata (training data) automatically on first use unless a
//! tessdata directory is configured.

use super::{cache_dir, download_file};
use crate::config::EngineConfig;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::preprocessing::BinaryMask;
use tesseract_static::tesseract::Tesseract;

/// Tesseract OCR Engine
pub struct LeptessEngine {
    /// Path to tessdata directory
    tessdata_path: String,
    language: String,
}

impl LeptessEngine {
    /// Create a new Tesseract-based OCR engine
    pub fn new(config: &EngineConfig) -> Result<Self, OcrError> {
        let language = config.language.clone();

        let tessdata_path = match &config.tessdata_path {
            Some(path) => path.clone(),
            None => ensure_tessdata_available(&language)?,
        };

        // Fail at startup rather than on the first request
        let test_tess = Tesseract::new(Some(&tessdata_path), Some(&language)).map_err(|e| {
            OcrError::InitializationError(format!("Failed to initialize Tesseract: {}", e))
        })?;
        drop(test_tess);

        tracing::info!(
            "Leptess engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            language
        );

        Ok(Self {
            tessdata_path,
            language,
        })
    }
}

impl OcrEngine for LeptessEngine {
    fn name(&self) -> &'static str {
        "leptess"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine - better for noisy/messy images like phone photos"
    }

    fn recognize(&self, mask: &BinaryMask) -> Result<String, OcrError> {
        let (width, height) = mask.dimensions();

        // BMP is always supported by leptonica
        let mut bmp_data = Vec::new();
        mask.to_dynamic()
            .into_rgb8()
            .write_to(
                &mut std::io::Cursor::new(&mut bmp_data),
                image::ImageFormat::Bmp,
            )
            .map_err(|e| OcrError::RecognitionError(format!("Failed to convert to BMP: {}", e)))?;

        tracing::debug!(
            "Processing mask: {}x{}, BMP size: {} bytes",
            width,
            height,
            bmp_data.len()
        );

        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(&self.language))
            .map_err(|e| OcrError::RecognitionError(format!("Failed to create Tesseract: {}", e)))?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            OcrError::RecognitionError(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        tess = tess
            .recognize()
            .map_err(|e| OcrError::RecognitionError(format!("Failed to recognize text: {}", e)))?;

        tess.get_text()
            .map_err(|e| OcrError::RecognitionError(format!("Failed to get text: {}", e)))
    }
}

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<String, OcrError> {
    let tessdata_dir = cache_dir().join("tessdata");

    std::fs::create_dir_all(&tessdata_dir).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create tessdata directory: {}", e))
    })?;

    let traineddata_path = tessdata_dir.join(format!("{}.traineddata", language));

    if !traineddata_path.exists() {
        tracing::info!(
            "Downloading tessdata for '{}' (this may take a moment)...",
            language
        );
        download_file(&tessdata_url(language), &traineddata_path)?;
        tracing::info!("Downloaded tessdata to {:?}", traineddata_path);
    } else {
        tracing::info!("Using cached tessdata from {:?}", tessdata_dir);
    }

    // Tesseract expects the directory, not the file
    tessdata_dir
        .to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| OcrError::InitializationError("Invalid tessdata path".to_string()))
}

/// Get tessdata download URL for a language
fn tessdata_url(language: &str) -> String {
    // tessdata_fast: smaller, faster downloads
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}
