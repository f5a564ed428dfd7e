//! Error types for the amtx-core library.

use thiserror::Error;

/// Main error type for the amtx library.
#[derive(Error, Debug)]
pub enum AmtxError {
    /// Neither text nor image data was supplied.
    #[error("either text or an image must be provided")]
    MissingInput,

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// No recognition engine is provisioned for this pipeline.
    #[error("OCR unavailable: {0}")]
    Unavailable(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Image bytes could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Result type for the amtx library.
pub type Result<T> = std::result::Result<T, AmtxError>;
