//! Core library for extracting monetary amounts from noisy receipt text.
//!
//! This crate provides:
//! - Numeric token discovery with OCR confusable correction
//! - Keyword-based labeling (total, paid, due, tax, change, discount)
//! - Total/paid/due reconciliation and confidence scoring
//! - An OCR seam for image input (pure Rust engine behind the `native` feature)

pub mod amounts;
pub mod error;
pub mod models;
pub mod ocr;
pub mod pipeline;

pub use amounts::{classify, tokenize, validate, ConfidenceReport};
pub use error::{AmtxError, OcrError, Result};
pub use models::{
    AmountType, AmtxConfig, ClassifiedAmount, ExtractionResponse, NumericToken, TokenStats,
    Tokenization, ValidationStatus,
};
pub use ocr::OcrProvider;
#[cfg(feature = "native")]
pub use ocr::PureOcrProvider;
pub use pipeline::{AmountPipeline, DocumentInput};
