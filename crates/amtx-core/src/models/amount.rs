//! Amount records flowing through the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A money-like substring found in the input, with its corrected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericToken {
    /// Matched substring exactly as it appeared in the text.
    pub raw: String,

    /// Value after confusable-character correction.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    /// Surrounding words, space-joined.
    pub context: String,
}

/// Counters collected while tokenizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStats {
    /// Number of pattern matches, including ones later dropped as unparsable.
    pub total: usize,

    /// Number of matches altered by the confusion map.
    pub corrected: usize,
}

/// Output of the tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenization {
    pub tokens: Vec<NumericToken>,
    pub stats: TokenStats,
}

impl Tokenization {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Semantic role assigned to an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountType {
    TotalBill,
    Paid,
    Due,
    Tax,
    Change,
    DiscountPct,
    Other,
    /// Synthetic entry describing a failed reconciliation.
    ValidationError,
}

impl AmountType {
    /// Wire name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountType::TotalBill => "total_bill",
            AmountType::Paid => "paid",
            AmountType::Due => "due",
            AmountType::Tax => "tax",
            AmountType::Change => "change",
            AmountType::DiscountPct => "discount_pct",
            AmountType::Other => "other",
            AmountType::ValidationError => "validation_error",
        }
    }
}

impl std::fmt::Display for AmountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedAmount {
    /// Semantic label.
    #[serde(rename = "type")]
    pub kind: AmountType,

    /// Numeric value, unchanged from the tokenizer.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    /// Context segment the label was derived from.
    pub source: String,
}

impl ClassifiedAmount {
    pub fn new(kind: AmountType, value: Decimal, source: impl Into<String>) -> Self {
        Self {
            kind,
            value,
            source: source.into(),
        }
    }
}

/// Outcome of the total/paid/due reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Total matches paid + due within tolerance.
    ValidationOk,
    /// Total disagrees with paid + due.
    ValidationInconsistent,
    /// At least one of total, paid or due is missing.
    ValidationPartial,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::ValidationOk => "validation_ok",
            ValidationStatus::ValidationInconsistent => "validation_inconsistent",
            ValidationStatus::ValidationPartial => "validation_partial",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
