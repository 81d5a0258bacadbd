//! OCR engine implementations
//!
//! This module contains implementations of the OcrEngine trait for different
//! OCR backends. Engines are conditionally compiled based on feature flags.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

use crate::config::EngineConfig;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Registry of available OCR engines
pub struct EngineRegistry {
    engines: Vec<Arc<dyn OcrEngine>>,
    default_engine: String,
}

impl EngineRegistry {
    /// Initialize every compiled-in engine, or only the configured one
    pub fn new(config: &EngineConfig) -> Result<Self, OcrError> {
        #[allow(unused_variables)]
        let wanted = |name: &str| config.engine.as_deref().map_or(true, |e| e == name);
        #[allow(unused_mut)]
        let mut engines: Vec<Arc<dyn OcrEngine>> = Vec::new();

        #[cfg(feature = "engine-ocrs")]
        {
            if wanted("ocrs") {
                tracing::info!("Initializing ocrs engine...");
                engines.push(Arc::new(ocrs::OcrsEngine::new(config)?));
            }
        }

        #[cfg(feature = "engine-leptess")]
        {
            if wanted("leptess") {
                tracing::info!("Initializing leptess engine...");
                engines.push(Arc::new(leptess::LeptessEngine::new(config)?));
            }
        }

        Self::from_engines(engines, config.engine.as_deref())
    }

    /// Build a registry from already constructed engines.
    ///
    /// `default` names the engine to prefer; otherwise the first one wins.
    pub fn from_engines(
        engines: Vec<Arc<dyn OcrEngine>>,
        default: Option<&str>,
    ) -> Result<Self, OcrError> {
        let default_engine = match default {
            Some(name) if engines.iter().any(|e| e.name() == name) => name.to_string(),
            Some(name) => {
                return Err(OcrError::InitializationError(format!(
                    "OCR engine '{}' is not available (compiled in: {})",
                    name,
                    compiled_engines().join(", ")
                )))
            }
            None => match engines.first() {
                Some(engine) => engine.name().to_string(),
                None => {
                    return Err(OcrError::InitializationError(
                        "No OCR engines available. Build with --features engine-ocrs or --features engine-leptess".to_string()
                    ))
                }
            },
        };

        Ok(Self {
            engines,
            default_engine,
        })
    }

    /// Get an engine by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn OcrEngine>> {
        self.engines.iter().find(|e| e.name() == name).cloned()
    }

    /// Get the default engine
    pub fn default(&self) -> Option<Arc<dyn OcrEngine>> {
        self.get(&self.default_engine)
    }

    /// Get the default engine name
    pub fn default_name(&self) -> &str {
        &self.default_engine
    }

    /// List all available engine names
    pub fn list(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name()).collect()
    }
}

fn compiled_engines() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut names = Vec::new();
    #[cfg(feature = "engine-ocrs")]
    names.push("ocrs");
    #[cfg(feature = "engine-leptess")]
    names.push("leptess");
    names
}

/// Per-user cache directory for downloaded models
pub(crate) fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("underline-ocr")
}

/// Download a file from URL to path using ureq
pub(crate) fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::InitializationError(format!("Failed to download {}: {}", url, e)))?;

    let buffer = response
        .into_body()
        .with_config()
        .limit(200 * 1024 * 1024)
        .read_to_vec()
        .map_err(|e| OcrError::InitializationError(format!("Failed to read {}: {}", url, e)))?;

    std::fs::write(path, &buffer).map_err(|e| {
        OcrError::InitializationError(format!("Failed to write {}: {}", path.display(), e))
    })?;

    Ok(())
}
