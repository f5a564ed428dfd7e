//! Data models shared across the pipeline.

pub mod amount;
pub mod config;
pub mod response;

pub use amount::{AmountType, ClassifiedAmount, NumericToken, TokenStats, Tokenization, ValidationStatus};
pub use config::{AmtxConfig, ExtractionConfig, OcrConfig};
pub use response::ExtractionResponse;
