use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use underline_ocr::cli::{Args, Command, ExtractArgs};
use underline_ocr::config::{BinarizeConfig, EngineConfig, ServerConfig};
use underline_ocr::preprocessing::StepTiming;
use underline_ocr::source::{self, ImageSource};
use underline_ocr::{raster, server, OcrProcessor};

#[derive(Serialize)]
struct ExtractReport<'a> {
    text: &'a str,
    engine: &'a str,
    lines_removed: usize,
    binarize_time_ms: u64,
    steps: &'a [StepTiming],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout is reserved for extracted text
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let binarize = BinarizeConfig::from(&args.binarize);
    let engine = EngineConfig::from(&args);

    tracing::debug!("Binarize config: {:?}", binarize);

    match &args.command {
        Command::Extract(extract) => run_extract(extract, binarize, &engine),
        Command::Serve(serve) => {
            let config = ServerConfig::from(serve);
            tracing::info!("Starting underline-ocr v{}", env!("CARGO_PKG_VERSION"));
            tracing::info!("Binding to {}:{}", config.host, config.port);

            let processor = OcrProcessor::new(binarize, &engine)?;
            server::run(processor, config).await
        }
    }
}

fn run_extract(
    args: &ExtractArgs,
    binarize: BinarizeConfig,
    engine: &EngineConfig,
) -> anyhow::Result<()> {
    let source = ImageSource::parse(&args.source)?;
    let bytes = source
        .load(args.max_file_size)
        .with_context(|| format!("Failed to load {}", args.source))?;
    let image = raster::decode(&bytes)?;

    if !args.no_cache {
        match source::cache_last_image(&image) {
            Ok(path) => tracing::debug!("Cached input image at {:?}", path),
            Err(e) => tracing::warn!("Could not cache input image: {}", e),
        }
    }

    let processor = OcrProcessor::new(binarize, engine)?;
    let output = processor.process(&image)?;

    if let Some(path) = &args.save_cleaned {
        output
            .mask
            .as_gray()
            .save(path)
            .with_context(|| format!("Failed to write cleaned image to {}", path.display()))?;
        tracing::info!("Cleaned image written to {}", path.display());
    }

    tracing::info!(
        "Extracted {} chars, removed {} line(s)",
        output.text.as_str().len(),
        output.lines_removed
    );

    if args.json {
        let report = ExtractReport {
            text: output.text.as_str(),
            engine: processor.engine_name(),
            lines_removed: output.lines_removed,
            binarize_time_ms: output.binarize_time_ms,
            steps: &output.steps,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", output.text);
    }

    Ok(())
}
