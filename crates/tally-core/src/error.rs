//! Error types for the tally-core library.

use thiserror::Error;

/// Main error type for the tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Object detection error.
    #[error("detection error: {0}")]
    Detect(#[from] DetectError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
///
/// These are raised by [`crate::ocr::OcrEngine`]'s fallible API only; the
/// path-based adapter swallows them and yields empty text, so a bad image
/// never aborts a scan.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Failed to prepare the image for the engine.
    #[error("failed to prepare input: {0}")]
    Preparation(String),

    /// Text detection failed.
    #[error("text detection failed: {0}")]
    Detection(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Errors related to object detection.
#[derive(Error, Debug)]
pub enum DetectError {
    /// Failed to load the detection model.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Failed to create the inference session.
    #[error("failed to create session: {0}")]
    SessionCreate(String),

    /// Inference execution failed.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Failed to extract or interpret the model output.
    #[error("failed to extract output: {0}")]
    OutputExtraction(String),
}

/// Result type for the tally library.
pub type Result<T> = std::result::Result<T, TallyError>;
