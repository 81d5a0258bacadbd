use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::preprocessing::BinaryMask;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Text pulled out of one image. No layout or confidence metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runs an engine over a binarized mask and tidies up what comes back.
///
/// A single attempt per call; engine failures surface as
/// [`OcrError::RecognitionError`].
#[derive(Clone)]
pub struct Recognizer {
    engine: Arc<dyn OcrEngine>,
}

impl Recognizer {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn engine_description(&self) -> &'static str {
        self.engine.description()
    }

    pub fn recognize(&self, mask: &BinaryMask) -> Result<ExtractedText, OcrError> {
        if mask.width() == 0 || mask.height() == 0 {
            return Err(OcrError::RecognitionError("zero-size mask".to_string()));
        }

        // Nothing to read; engines disagree on whether a blank page is an error.
        if mask.is_blank() {
            tracing::debug!("Mask is blank, skipping {} engine", self.engine.name());
            return Ok(ExtractedText::default());
        }

        let raw = self.engine.recognize(mask).map_err(|e| match e {
            OcrError::RecognitionError(_) => e,
            other => OcrError::RecognitionError(other.to_string()),
        })?;

        Ok(ExtractedText(normalize(&raw)))
    }
}

/// Strip the control characters and trailing whitespace engines leave behind
/// (Tesseract ends every page with a form feed).
fn normalize(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .map(|line| line.trim_end_matches(|c: char| c.is_whitespace() || c.is_control()))
        .collect();

    lines
        .join("\n")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim_end()
        .to_string()
}
