mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use underline_ocr::server::{router, AppState};
use underline_ocr::{BinarizeConfig, OcrProcessor, ServerConfig};

const BOUNDARY: &str = "underline-ocr-test-boundary";

enum Part<'a> {
    File(&'a [u8]),
    Text(&'a str, &'a str),
}

fn app(max_file_size: usize) -> axum::Router {
    let processor =
        OcrProcessor::with_engine(BinarizeConfig::default(), Arc::new(CannedEngine::new("HHH\n")))
            .unwrap();
    router(AppState {
        processor: Arc::new(processor),
        config: Arc::new(ServerConfig {
            max_file_size,
            ..Default::default()
        }),
    })
}

fn multipart(parts: &[Part]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File(bytes) => {
                body.extend_from_slice(
                    b"Content-Disposition: form-data; name=\"file\"; filename=\"scan.png\"\r\n\
                      Content-Type: image/png\r\n\r\n",
                );
                body.extend_from_slice(bytes);
            }
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}",
                        name, value
                    )
                    .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/ocr")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::get("/health").body(Body::empty()).unwrap();

    let (status, body) = send(app(1 << 20), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_info_endpoint_reports_tuning() {
    let request = Request::get("/info").body(Body::empty()).unwrap();

    let (status, body) = send(app(1 << 20), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["engine"], "canned");
    assert_eq!(body["engine_description"], "returns fixed text");
    assert_eq!(body["binarize"]["threshold"], 150);
    assert_eq!(body["binarize"]["kernel_width"], 40);
    assert_eq!(body["binarize"]["iterations"], 2);
    assert_eq!(body["min_line_length"], 79);
    assert_eq!(body["max_file_size_bytes"], 1 << 20);
}

#[tokio::test]
async fn test_ocr_on_underlined_word() {
    let png = png_bytes(&underlined_word());

    let (status, body) = send(app(1 << 20), multipart(&[Part::File(&png)])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "HHH");
    assert_eq!(body["engine"], "canned");
    assert_eq!(body["lines_removed"], 1);
    assert_eq!(body["steps"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_ocr_on_blank_page_returns_empty_text() {
    let png = png_bytes(&blank_page(64, 64));

    let (status, body) = send(app(1 << 20), multipart(&[Part::File(&png)])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "");
    assert_eq!(body["lines_removed"], 0);
}

#[tokio::test]
async fn test_ocr_accepts_tuning_overrides() {
    let mut page = blank_page(100, 20);
    fill(&mut page, 30, 10, 80, 11, BLACK); // 50 px: kept by default, removed at one iteration
    let png = png_bytes(&page);

    let (_, default_body) = send(app(1 << 20), multipart(&[Part::File(&png)])).await;
    let (status, tuned_body) = send(
        app(1 << 20),
        multipart(&[Part::Text("iterations", "1"), Part::File(&png)]),
    )
    .await;

    assert_eq!(default_body["lines_removed"], 0);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tuned_body["lines_removed"], 1);
    assert_eq!(tuned_body["text"], "");
}

#[tokio::test]
async fn test_missing_file() {
    let (status, body) = send(app(1 << 20), multipart(&[Part::Text("threshold", "120")])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FILE");
}

#[tokio::test]
async fn test_undecodable_file() {
    let (status, body) = send(app(1 << 20), multipart(&[Part::File(b"not a png")])).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_IMAGE");
}

#[tokio::test]
async fn test_invalid_override_value() {
    let png = png_bytes(&underlined_word());

    let (status, body) = send(
        app(1 << 20),
        multipart(&[Part::Text("threshold", "dark"), Part::File(&png)]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_degenerate_override_config() {
    let png = png_bytes(&underlined_word());

    let (status, body) = send(
        app(1 << 20),
        multipart(&[Part::Text("kernel_width", "0"), Part::File(&png)]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_CONFIG");
}

#[tokio::test]
async fn test_oversized_override_config() {
    let png = png_bytes(&underlined_word());

    for (name, value) in [
        ("iterations", "1000"),
        ("erase_thickness", "100000"),
        ("kernel_width", "4096"),
    ] {
        let (status, body) = send(
            app(1 << 20),
            multipart(&[Part::Text(name, value), Part::File(&png)]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}={}", name, value);
        assert_eq!(body["code"], "INVALID_CONFIG");
    }
}
