use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Recognition failed: {0}")]
    RecognitionError(String),

    #[error("Failed to load image source: {0}")]
    SourceError(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OcrError {
    /// Stable machine-readable code, shared by the HTTP body and the CLI's JSON output
    pub fn code(&self) -> &'static str {
        match self {
            OcrError::InitializationError(_) => "INIT_ERROR",
            OcrError::InvalidImage(_) => "INVALID_IMAGE",
            OcrError::InvalidConfig(_) => "INVALID_CONFIG",
            OcrError::RecognitionError(_) => "RECOGNITION_ERROR",
            OcrError::SourceError(_) => "SOURCE_ERROR",
            OcrError::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",
            OcrError::MissingFile => "MISSING_FILE",
            OcrError::InvalidRequest(_) => "INVALID_REQUEST",
            OcrError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            OcrError::InvalidImage(_) => StatusCode::UNPROCESSABLE_ENTITY,
            OcrError::InvalidConfig(_)
            | OcrError::MissingFile
            | OcrError::InvalidRequest(_)
            | OcrError::SourceError(_) => StatusCode::BAD_REQUEST,
            OcrError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            OcrError::InitializationError(_)
            | OcrError::RecognitionError(_)
            | OcrError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for OcrError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}
