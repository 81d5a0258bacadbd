use crate::cli::{Args, BinarizeArgs, ServeArgs};
use crate::error::OcrError;
use serde::Serialize;

/// Largest structuring element side the morphology supports
pub const MAX_KERNEL_SIZE: u32 = 511;
/// Upper bound on erosions (and dilations) per opening
pub const MAX_ITERATIONS: u32 = 16;
/// Upper bound on the erase stroke
pub const MAX_ERASE_THICKNESS: u32 = 64;

/// Tuning for the binarize pipeline.
///
/// The defaults were tuned empirically on scanned office documents. They are
/// starting points, not physical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BinarizeConfig {
    /// Pixels at or below this gray level become ink
    pub threshold: u8,
    /// Structuring element width; shorter horizontal runs are not treated as lines
    pub kernel_width: u32,
    /// Structuring element height
    pub kernel_height: u32,
    /// Erosions (then dilations) per opening
    pub iterations: u32,
    /// Stroke used to erase a detected line; half of it spills past the line on each side
    pub erase_thickness: u32,
}

impl Default for BinarizeConfig {
    fn default() -> Self {
        Self {
            threshold: 150,
            kernel_width: 40,
            kernel_height: 1,
            iterations: 2,
            erase_thickness: 2,
        }
    }
}

impl BinarizeConfig {
    pub fn validate(&self) -> Result<(), OcrError> {
        if self.kernel_width == 0 || self.kernel_height == 0 {
            return Err(OcrError::InvalidConfig(format!(
                "structuring element must be at least 1x1, got {}x{}",
                self.kernel_width, self.kernel_height
            )));
        }
        if self.kernel_width > MAX_KERNEL_SIZE || self.kernel_height > MAX_KERNEL_SIZE {
            return Err(OcrError::InvalidConfig(format!(
                "structuring element must be at most {}x{}, got {}x{}",
                MAX_KERNEL_SIZE, MAX_KERNEL_SIZE, self.kernel_width, self.kernel_height
            )));
        }
        if self.iterations == 0 || self.iterations > MAX_ITERATIONS {
            return Err(OcrError::InvalidConfig(format!(
                "opening iterations must be between 1 and {}, got {}",
                MAX_ITERATIONS, self.iterations
            )));
        }
        if self.erase_thickness > MAX_ERASE_THICKNESS {
            return Err(OcrError::InvalidConfig(format!(
                "erase thickness must be at most {}, got {}",
                MAX_ERASE_THICKNESS, self.erase_thickness
            )));
        }
        Ok(())
    }

    /// Shortest horizontal ink run that survives the opening
    pub fn min_line_length(&self) -> u32 {
        self.iterations * (self.kernel_width - 1) + 1
    }
}

/// Recognition engine selection
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine name; `None` picks the first compiled-in engine
    pub engine: Option<String>,
    pub language: String,
    pub tessdata_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: None,
            language: "eng".to_string(),
            tessdata_path: None,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_file_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9292,
            max_file_size: 52_428_800,
        }
    }
}

impl From<&BinarizeArgs> for BinarizeConfig {
    fn from(args: &BinarizeArgs) -> Self {
        Self {
            threshold: args.threshold,
            kernel_width: args.kernel_width,
            kernel_height: args.kernel_height,
            iterations: args.iterations,
            erase_thickness: args.erase_thickness,
        }
    }
}

impl From<&Args> for EngineConfig {
    fn from(args: &Args) -> Self {
        Self {
            engine: args.engine.clone(),
            language: args.language.clone(),
            tessdata_path: args.tessdata_path.clone(),
        }
    }
}

impl From<&ServeArgs> for ServerConfig {
    fn from(args: &ServeArgs) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            max_file_size: args.max_file_size,
        }
    }
}
