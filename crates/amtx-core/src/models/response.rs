//! Caller-facing result envelope.

use serde::{Deserialize, Serialize};

use super::amount::{ClassifiedAmount, ValidationStatus};

/// Reason reported when no numeric tokens survive tokenization.
pub const NO_AMOUNTS_REASON: &str = "document too noisy";

/// Result of one pipeline run, tagged by `status` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionResponse {
    /// Amounts were found and labeled.
    Ok {
        /// Overall confidence, rounded to two decimals.
        confidence: f64,
        /// Currency hint echoed back, or the configured default.
        currency: String,
        amounts: Vec<ClassifiedAmount>,
        validation_status: ValidationStatus,
    },

    /// An image was supplied but no OCR engine is provisioned.
    OcrUnavailable { reason: String },

    /// The text contained no numeric tokens.
    NoAmountsFound { reason: String },
}

impl ExtractionResponse {
    /// Whether amounts were extracted.
    pub fn is_ok(&self) -> bool {
        matches!(self, ExtractionResponse::Ok { .. })
    }

    /// Wire value of the `status` tag.
    pub fn status(&self) -> &'static str {
        match self {
            ExtractionResponse::Ok { .. } => "ok",
            ExtractionResponse::OcrUnavailable { .. } => "ocr_unavailable",
            ExtractionResponse::NoAmountsFound { .. } => "no_amounts_found",
        }
    }

    /// Amounts carried by a successful response, empty otherwise.
    pub fn amounts(&self) -> &[ClassifiedAmount] {
        match self {
            ExtractionResponse::Ok { amounts, .. } => amounts,
            _ => &[],
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
