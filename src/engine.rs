use crate::error::OcrError;
use crate::preprocessing::BinaryMask;

/// Trait that all OCR engines must implement
///
/// Engines only ever see cleaned masks; the type makes it impossible to hand
/// them a raw, un-binarized image.
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs", "leptess")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Run recognition and return the engine's raw text output
    fn recognize(&self, mask: &BinaryMask) -> Result<String, OcrError>;
}
