use crate::config::BinarizeConfig;
use crate::error::OcrError;
use crate::raster::{self, RasterImage};
use serde::Serialize;
use std::time::Instant;

use super::mask::BinaryMask;
use super::steps;

/// Timing information for a single preprocessing step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of binarization including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct Binarization {
    /// Cleaned mask (not serialized)
    #[serde(skip)]
    pub mask: BinaryMask,
    /// Number of horizontal lines erased
    pub lines_removed: usize,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Turns any raster into a clean black-on-white mask with underlines removed.
///
/// Stateless apart from its configuration: the same input always yields the
/// same mask, and one binarizer may be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Binarizer {
    config: BinarizeConfig,
}

impl Binarizer {
    pub fn new(config: BinarizeConfig) -> Result<Self, OcrError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BinarizeConfig {
        &self.config
    }

    pub fn binarize(&self, image: &RasterImage) -> Result<BinaryMask, OcrError> {
        Ok(self.run(image)?.mask)
    }

    /// Binarize and report what happened along the way
    pub fn run(&self, image: &RasterImage) -> Result<Binarization, OcrError> {
        raster::ensure_non_empty(image)?;

        let start = Instant::now();
        let mut timings = Vec::new();
        let config = &self.config;

        let gray = run_step("grayscale", &mut timings, || steps::grayscale::apply(image));
        let binary = run_step("threshold", &mut timings, || {
            steps::threshold::apply(&gray, config.threshold)
        });
        let (cleaned, lines_removed) =
            run_step("lines", &mut timings, || steps::lines::apply(binary, config));
        let inverted = run_step("invert", &mut timings, || steps::invert::apply(cleaned));

        let total_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "Binarized {}x{} image in {}ms, removed {} line(s)",
            image.width(),
            image.height(),
            total_time_ms,
            lines_removed
        );

        Ok(Binarization {
            mask: BinaryMask::from_binarized(inverted),
            lines_removed,
            total_time_ms,
            steps: timings,
        })
    }
}

fn run_step<T, F>(name: &str, timings: &mut Vec<StepTiming>, step_fn: F) -> T
where
    F: FnOnce() -> T,
{
    let step_start = Instant::now();
    let result = step_fn();
    let time_ms = step_start.elapsed().as_millis() as u64;
    tracing::debug!("Step {} took {}ms", name, time_ms);
    timings.push(StepTiming {
        name: name.to_string(),
        time_ms,
    });
    result
}
