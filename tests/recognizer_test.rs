mod common;

use common::*;
use image::DynamicImage;
use std::sync::Arc;
use underline_ocr::{
    extract_text, BinarizeConfig, Binarizer, BinaryMask, OcrError, OcrProcessor, Recognizer,
};

#[test]
fn test_blank_mask_yields_empty_text_without_engine_call() {
    let engine = Arc::new(CannedEngine::new("should not appear"));
    let recognizer = Recognizer::new(engine.clone());
    let mask = BinaryMask::from_gray(blank_page(50, 50)).unwrap();

    let text = recognizer.recognize(&mask).unwrap();

    assert!(text.is_blank());
    assert_eq!(text.as_str(), "");
    assert_eq!(engine.calls(), 0);
}

#[test]
fn test_engine_output_is_normalized() {
    let engine = Arc::new(CannedEngine::new("HHH  \nsecond line\n\x0c"));
    let recognizer = Recognizer::new(engine.clone());
    let mask = Binarizer::default()
        .binarize(&DynamicImage::ImageLuma8(underlined_word()))
        .unwrap();

    let text = recognizer.recognize(&mask).unwrap();

    assert_eq!(text.as_str(), "HHH\nsecond line");
    assert_eq!(engine.calls(), 1);
}

#[test]
fn test_engine_failure_becomes_recognition_error() {
    let recognizer = Recognizer::new(Arc::new(FailingEngine(|| {
        OcrError::Internal("engine crashed".to_string())
    })));
    let mask = Binarizer::default()
        .binarize(&DynamicImage::ImageLuma8(underlined_word()))
        .unwrap();

    let err = recognizer.recognize(&mask).unwrap_err();

    match err {
        OcrError::RecognitionError(msg) => assert!(msg.contains("engine crashed")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_recognition_error_passes_through_verbatim() {
    let recognizer = Recognizer::new(Arc::new(FailingEngine(|| {
        OcrError::RecognitionError("bad buffer".to_string())
    })));
    let mask = Binarizer::default()
        .binarize(&DynamicImage::ImageLuma8(underlined_word()))
        .unwrap();

    let err = recognizer.recognize(&mask).unwrap_err();

    assert_eq!(err.to_string(), "Recognition failed: bad buffer");
}

#[test]
fn test_extract_text_binarizes_before_recognizing() {
    // CannedEngine asserts it only ever sees two-level pixels
    let engine = Arc::new(CannedEngine::new("HHH"));
    let recognizer = Recognizer::new(engine.clone());
    let mut noisy = underlined_word();
    fill(&mut noisy, 0, 0, 10, 10, 128);

    let text = extract_text(
        &DynamicImage::ImageLuma8(noisy),
        &BinarizeConfig::default(),
        &recognizer,
    )
    .unwrap();

    assert_eq!(text.as_str(), "HHH");
    assert_eq!(engine.calls(), 1);
}

#[test]
fn test_processor_reports_removed_lines() {
    let processor =
        OcrProcessor::with_engine(BinarizeConfig::default(), Arc::new(CannedEngine::new("HHH")))
            .unwrap();

    let output = processor.process_bytes(&png_bytes(&underlined_word())).unwrap();

    assert_eq!(output.text.as_str(), "HHH");
    assert_eq!(output.lines_removed, 1);
    assert_eq!(output.mask.dimensions(), (140, 70));
    assert_eq!(processor.engine_name(), "canned");
}

#[test]
fn test_processor_rejects_garbage_bytes() {
    let processor =
        OcrProcessor::with_engine(BinarizeConfig::default(), Arc::new(CannedEngine::new("")))
            .unwrap();

    assert!(matches!(
        processor.process_bytes(b"not an image"),
        Err(OcrError::InvalidImage(_))
    ));
}
