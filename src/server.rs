use crate::config::{BinarizeConfig, ServerConfig};
use crate::error::OcrError;
use crate::ocr::OcrProcessor;
use crate::preprocessing::StepTiming;
use axum::{
    body::Bytes,
    extract::{multipart::Field, DefaultBodyLimit, Multipart, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<OcrProcessor>,
    pub config: Arc<ServerConfig>,
}

/// OCR response
#[derive(Serialize)]
pub struct OcrResponse {
    pub text: String,
    pub engine: String,
    pub lines_removed: usize,
    pub processing_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub engine: String,
    pub engine_description: String,
    pub binarize: BinarizeConfig,
    pub min_line_length: u32,
    pub max_file_size_bytes: usize,
}

/// Run the HTTP server
pub async fn run(processor: OcrProcessor, config: ServerConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = router(AppState {
        processor: Arc::new(processor),
        config: Arc::new(config),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router without binding a socket
pub fn router(state: AppState) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/ocr", post(handle_ocr))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle OCR requests
async fn handle_ocr(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OcrResponse>, OcrError> {
    let start = Instant::now();

    let mut file_data: Option<Bytes> = None;
    let mut config = *state.processor.config();

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| OcrError::InvalidRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                file_data = Some(field.bytes().await.map_err(|e| {
                    OcrError::InvalidRequest(format!("Failed to read file data: {}", e))
                })?);
            }
            "threshold" => config.threshold = parse_field(&name, field).await?,
            "kernel_width" => config.kernel_width = parse_field(&name, field).await?,
            "kernel_height" => config.kernel_height = parse_field(&name, field).await?,
            "iterations" => config.iterations = parse_field(&name, field).await?,
            "erase_thickness" => config.erase_thickness = parse_field(&name, field).await?,
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let data = file_data.ok_or(OcrError::MissingFile)?;

    if data.len() > state.config.max_file_size {
        return Err(OcrError::ImageTooLarge {
            size: data.len(),
            max: state.config.max_file_size,
        });
    }

    let processor = if config == *state.processor.config() {
        state.processor.clone()
    } else {
        tracing::debug!("Using per-request binarize overrides: {:?}", config);
        Arc::new(state.processor.with_config(config)?)
    };

    // Binarization and recognition are CPU-bound
    let output = tokio::task::spawn_blocking(move || processor.process_bytes(&data))
        .await
        .map_err(|e| OcrError::Internal(format!("OCR task failed: {}", e)))??;

    let processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        "OCR completed in {}ms, lines removed: {}, text length: {}",
        processing_time_ms,
        output.lines_removed,
        output.text.as_str().len()
    );

    Ok(Json(OcrResponse {
        text: output.text.into_string(),
        engine: state.processor.engine_name().to_string(),
        lines_removed: output.lines_removed,
        processing_time_ms,
        steps: output.steps,
    }))
}

async fn parse_field<T: FromStr>(name: &str, field: Field<'_>) -> Result<T, OcrError> {
    let text = field
        .text()
        .await
        .map_err(|e| OcrError::InvalidRequest(format!("Invalid {}: {}", name, e)))?;
    text.trim()
        .parse()
        .map_err(|_| OcrError::InvalidRequest(format!("Invalid {}: {:?}", name, text)))
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: state.processor.engine_name().to_string(),
        engine_description: state.processor.engine_description().to_string(),
        binarize: *state.processor.config(),
        min_line_length: state.processor.config().min_line_length(),
        max_file_size_bytes: state.config.max_file_size,
    })
}
