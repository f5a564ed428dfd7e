//! Confidence scoring from tokenizer and classifier statistics.

use serde::{Deserialize, Serialize};

use crate::models::{AmountType, ClassifiedAmount, ExtractionConfig, TokenStats};

/// Component and overall confidence for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    pub normalization: f64,
    pub classification: f64,
    /// Mean of the two components, rounded to two decimals.
    pub overall: f64,
}

/// Weights and clamps for the confidence formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceWeights {
    pub correction_penalty: f64,
    pub min_normalization: f64,
    pub max_classification: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            correction_penalty: 0.25,
            min_normalization: 0.6,
            max_classification: 0.95,
        }
    }
}

impl From<&ExtractionConfig> for ConfidenceWeights {
    fn from(config: &ExtractionConfig) -> Self {
        Self {
            correction_penalty: config.correction_penalty,
            min_normalization: config.min_normalization_confidence,
            max_classification: config.max_classification_confidence,
        }
    }
}

impl ConfidenceWeights {
    /// Penalize the share of tokens that needed OCR correction.
    pub fn normalization(&self, stats: &TokenStats) -> f64 {
        if stats.total == 0 {
            return 1.0;
        }
        let penalty = stats.correction_rate() * self.correction_penalty;
        (1.0 - penalty).max(self.min_normalization)
    }

    /// Share of amounts that received a label other than `other`.
    ///
    /// Returns 0.0 for an empty list.
    pub fn classification(&self, amounts: &[ClassifiedAmount]) -> f64 {
        if amounts.is_empty() {
            return 0.0;
        }
        let labeled = amounts
            .iter()
            .filter(|a| a.kind != AmountType::Other)
            .count();
        (labeled as f64 / amounts.len() as f64).min(self.max_classification)
    }

    pub fn report(&self, stats: &TokenStats, amounts: &[ClassifiedAmount]) -> ConfidenceReport {
        let normalization = self.normalization(stats);
        let classification = self.classification(amounts);

        ConfidenceReport {
            normalization,
            classification,
            overall: round2(0.5 * normalization + 0.5 * classification),
        }
    }
}

/// Score a run with the default weights.
pub fn score(stats: &TokenStats, amounts: &[ClassifiedAmount]) -> ConfidenceReport {
    ConfidenceWeights::default().report(stats, amounts)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn amounts(kinds: &[AmountType]) -> Vec<ClassifiedAmount> {
        kinds
            .iter()
            .map(|&k| ClassifiedAmount::new(k, Decimal::ONE, ""))
            .collect()
    }

    #[test]
    fn test_normalization() {
        let weights = ConfidenceWeights::default();
        assert_eq!(weights.normalization(&TokenStats::default()), 1.0);
        assert_eq!(weights.normalization(&TokenStats { total: 4, corrected: 0 }), 1.0);
        assert_eq!(weights.normalization(&TokenStats { total: 4, corrected: 2 }), 0.875);
        assert_eq!(weights.normalization(&TokenStats { total: 4, corrected: 4 }), 0.75);
    }

    #[test]
    fn test_normalization_floor() {
        let weights = ConfidenceWeights {
            correction_penalty: 0.9,
            ..Default::default()
        };
        assert_eq!(weights.normalization(&TokenStats { total: 1, corrected: 1 }), 0.6);
    }

    #[test]
    fn test_classification() {
        let weights = ConfidenceWeights::default();
        assert_eq!(weights.classification(&[]), 0.0);
        assert_eq!(
            weights.classification(&amounts(&[AmountType::Paid, AmountType::Other])),
            0.5
        );
        assert_eq!(
            weights.classification(&amounts(&[AmountType::Paid, AmountType::Due])),
            0.95
        );
    }

    #[test]
    fn test_overall_rounded() {
        // 0.5 * (1 - 1/3 * 0.25) + 0.5 * 0.95 = 0.933..
        let report = score(
            &TokenStats { total: 3, corrected: 1 },
            &amounts(&[AmountType::TotalBill, AmountType::Paid, AmountType::Due]),
        );
        assert_eq!(report.classification, 0.95);
        assert_eq!(report.overall, 0.93);
    }
}
