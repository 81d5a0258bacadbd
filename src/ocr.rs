use crate::config::{BinarizeConfig, EngineConfig};
use crate::engine::OcrEngine;
use crate::engines::EngineRegistry;
use crate::error::OcrError;
use crate::preprocessing::{Binarization, Binarizer, BinaryMask, StepTiming};
use crate::raster::{self, RasterImage};
use crate::recognizer::{ExtractedText, Recognizer};
use std::sync::Arc;

/// Everything one pipeline run produced
#[derive(Debug, Clone)]
pub struct OcrOutput {
    pub text: ExtractedText,
    pub mask: BinaryMask,
    pub lines_removed: usize,
    pub binarize_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// The full pipeline: raster image, binarizer, recognizer, text
#[derive(Clone)]
pub struct OcrProcessor {
    binarizer: Binarizer,
    recognizer: Recognizer,
}

impl OcrProcessor {
    /// Initialize the configured engine and wrap it in a pipeline
    pub fn new(binarize: BinarizeConfig, engine: &EngineConfig) -> Result<Self, OcrError> {
        let registry = EngineRegistry::new(engine)?;
        tracing::debug!(
            "Engines available: {} (default: {})",
            registry.list().join(", "),
            registry.default_name()
        );
        let engine = registry.default().ok_or_else(|| {
            OcrError::InitializationError("No default OCR engine".to_string())
        })?;
        tracing::info!("Using {} engine", engine.name());
        Self::with_engine(binarize, engine)
    }

    pub fn with_engine(
        binarize: BinarizeConfig,
        engine: Arc<dyn OcrEngine>,
    ) -> Result<Self, OcrError> {
        Ok(Self {
            binarizer: Binarizer::new(binarize)?,
            recognizer: Recognizer::new(engine),
        })
    }

    pub fn config(&self) -> &BinarizeConfig {
        self.binarizer.config()
    }

    pub fn engine_name(&self) -> &'static str {
        self.recognizer.engine_name()
    }

    pub fn engine_description(&self) -> &'static str {
        self.recognizer.engine_description()
    }

    /// Same engine, different binarize tuning
    pub fn with_config(&self, binarize: BinarizeConfig) -> Result<Self, OcrError> {
        Ok(Self {
            binarizer: Binarizer::new(binarize)?,
            recognizer: self.recognizer.clone(),
        })
    }

    pub fn process(&self, image: &RasterImage) -> Result<OcrOutput, OcrError> {
        let Binarization {
            mask,
            lines_removed,
            total_time_ms,
            steps,
        } = self.binarizer.run(image)?;

        let text = self.recognizer.recognize(&mask)?;

        Ok(OcrOutput {
            text,
            mask,
            lines_removed,
            binarize_time_ms: total_time_ms,
            steps,
        })
    }

    /// Decode encoded image bytes and run the pipeline
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<OcrOutput, OcrError> {
        let image = raster::decode(bytes)?;
        self.process(&image)
    }
}

/// Binarize and recognize in one call
pub fn extract_text(
    image: &RasterImage,
    config: &BinarizeConfig,
    recognizer: &Recognizer,
) -> Result<ExtractedText, OcrError> {
    let mask = Binarizer::new(*config)?.binarize(image)?;
    recognizer.recognize(&mask)
}
