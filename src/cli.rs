use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "underline-ocr")]
#[command(about = "Extract text from scanned documents, stripping underlines and rule lines first")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub binarize: BinarizeArgs,

    /// OCR engine to use (e.g., "ocrs", "leptess"); defaults to the first compiled-in engine
    #[arg(long, global = true, env = "OCR_ENGINE")]
    pub engine: Option<String>,

    /// Tesseract language model (leptess engine only)
    #[arg(long, global = true, env = "OCR_LANGUAGE", default_value = "eng")]
    pub language: String,

    /// Path to tessdata directory (downloaded to the cache dir if not set)
    #[arg(long, global = true, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract text from a single image
    Extract(ExtractArgs),
    /// Run the HTTP server
    Serve(ServeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ExtractArgs {
    /// Image path, file:// URI or http(s) URL
    pub source: String,

    /// Write the cleaned black-and-white image here
    #[arg(long)]
    pub save_cleaned: Option<PathBuf>,

    /// Print a JSON document instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Do not keep a cached copy of the processed image
    #[arg(long)]
    pub no_cache: bool,

    /// Maximum size in bytes of a fetched image (default: 50MB)
    #[arg(long, env = "OCR_MAX_FILE_SIZE", default_value = "52428800")]
    pub max_file_size: usize,
}

#[derive(ClapArgs, Debug)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long, env = "OCR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "OCR_PORT", default_value = "9292")]
    pub port: u16,

    /// Maximum file size in bytes (default: 50MB)
    #[arg(long, env = "OCR_MAX_FILE_SIZE", default_value = "52428800")]
    pub max_file_size: usize,
}

#[derive(ClapArgs, Debug)]
pub struct BinarizeArgs {
    /// Gray level at or below which a pixel counts as ink (0-255)
    #[arg(long, global = true, env = "OCR_THRESHOLD", default_value = "150")]
    pub threshold: u8,

    /// Width of the line-detection structuring element
    #[arg(long, global = true, env = "OCR_KERNEL_WIDTH", default_value = "40")]
    pub kernel_width: u32,

    /// Height of the line-detection structuring element
    #[arg(long, global = true, env = "OCR_KERNEL_HEIGHT", default_value = "1")]
    pub kernel_height: u32,

    /// Morphological opening iterations
    #[arg(long, global = true, env = "OCR_ITERATIONS", default_value = "2")]
    pub iterations: u32,

    /// Stroke thickness used to erase detected lines
    #[arg(long, global = true, env = "OCR_ERASE_THICKNESS", default_value = "2")]
    pub erase_thickness: u32,
}
