//! Where input images come from
//!
//! Caller-side glue for the CLI and server: resolving a path, a `file://`
//! URI or a remote URL into encoded bytes, and keeping a copy of the last
//! processed image. The pipeline itself never touches any of this.

use crate::engines::cache_dir;
use crate::error::OcrError;
use crate::raster::RasterImage;
use std::path::{Path, PathBuf};

/// A user-supplied image location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
}

impl ImageSource {
    /// Classify a path, `file://` URI or `http(s)://` URL
    pub fn parse(input: &str) -> Result<Self, OcrError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(OcrError::SourceError("empty image source".to_string()));
        }

        if let Some(rest) = input.strip_prefix("file://") {
            let rest = rest.strip_prefix("localhost").unwrap_or(rest);
            let decoded = urlencoding::decode(rest).map_err(|e| {
                OcrError::SourceError(format!("Invalid file URI {}: {}", input, e))
            })?;
            return Ok(Self::Path(PathBuf::from(decoded.into_owned())));
        }

        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Url(input.to_string()));
        }

        Ok(Self::Path(PathBuf::from(input)))
    }

    /// Fetch the encoded image bytes, refusing anything over `max_bytes`
    pub fn load(&self, max_bytes: usize) -> Result<Vec<u8>, OcrError> {
        match self {
            Self::Path(path) => read_file(path, max_bytes),
            Self::Url(url) => fetch_url(url, max_bytes),
        }
    }
}

fn read_file(path: &Path, max_bytes: usize) -> Result<Vec<u8>, OcrError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| OcrError::SourceError(format!("{}: {}", path.display(), e)))?;
    if metadata.len() > max_bytes as u64 {
        return Err(OcrError::ImageTooLarge {
            size: metadata.len() as usize,
            max: max_bytes,
        });
    }

    std::fs::read(path).map_err(|e| OcrError::SourceError(format!("{}: {}", path.display(), e)))
}

fn fetch_url(url: &str, max_bytes: usize) -> Result<Vec<u8>, OcrError> {
    tracing::info!("Fetching image from {}", url);

    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::SourceError(format!("Failed to fetch {}: {}", url, e)))?;

    let bytes = response
        .into_body()
        .with_config()
        .limit(max_bytes as u64)
        .read_to_vec()
        .map_err(|e| OcrError::SourceError(format!("Failed to read {}: {}", url, e)))?;

    tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes)
}

/// Location of the cached copy of the last processed image
pub fn last_image_path() -> PathBuf {
    cache_dir().join("last_image.png")
}

/// Overwrite the cached copy of the last processed image
pub fn cache_last_image(image: &RasterImage) -> Result<PathBuf, OcrError> {
    let path = last_image_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| OcrError::Internal(format!("Failed to create cache dir: {}", e)))?;
    }
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| OcrError::Internal(format!("Failed to cache image: {}", e)))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        assert_eq!(
            ImageSource::parse("scans/page 1.png").unwrap(),
            ImageSource::Path(PathBuf::from("scans/page 1.png"))
        );
    }

    #[test]
    fn test_parse_file_uri_decodes_escapes() {
        assert_eq!(
            ImageSource::parse("file:///tmp/page%201.png").unwrap(),
            ImageSource::Path(PathBuf::from("/tmp/page 1.png"))
        );
        assert_eq!(
            ImageSource::parse("file://localhost/tmp/a.png").unwrap(),
            ImageSource::Path(PathBuf::from("/tmp/a.png"))
        );
    }

    #[test]
    fn test_parse_url() {
        assert_eq!(
            ImageSource::parse("HTTPS://example.com/a.png").unwrap(),
            ImageSource::Url("HTTPS://example.com/a.png".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            ImageSource::parse("   "),
            Err(OcrError::SourceError(_))
        ));
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let source = ImageSource::Path(PathBuf::from("/definitely/not/here.png"));
        assert!(matches!(source.load(1024), Err(OcrError::SourceError(_))));
    }
}
