//! Configuration structures for the amount pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the amtx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmtxConfig {
    /// Amount extraction configuration.
    pub extraction: ExtractionConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,
}

/// Tokenization, reconciliation and confidence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Words taken on each side of a token's enclosing word.
    pub context_window: usize,

    /// Maximum allowed |total - (paid + due)|.
    #[serde(with = "rust_decimal::serde::float")]
    pub tolerance: Decimal,

    /// Weight of the corrected-token ratio in normalization confidence.
    pub correction_penalty: f64,

    /// Floor for normalization confidence.
    pub min_normalization_confidence: f64,

    /// Ceiling for classification confidence.
    pub max_classification_confidence: f64,

    /// Currency reported when the caller gives no hint.
    pub default_currency: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_window: 2,
            tolerance: Decimal::new(1, 2),
            correction_penalty: 0.25,
            min_normalization_confidence: 0.6,
            max_classification_confidence: 0.95,
            default_currency: String::new(),
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Allow image input at all.
    pub enabled: bool,

    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` markers in recognized text instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.model_dir.join(model_name)
    }

    /// Whether every model file the engine needs is present on disk.
    pub fn models_present(&self) -> bool {
        [&self.detection_model, &self.recognition_model, &self.dictionary]
            .iter()
            .all(|name| self.model_path(name).exists())
    }
}

impl AmtxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AmtxConfig::default();
        assert_eq!(config.extraction.context_window, 2);
        assert_eq!(config.extraction.tolerance, Decimal::new(1, 2));
        assert_eq!(config.extraction.default_currency, "");
        assert!(config.ocr.enabled);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AmtxConfig =
            serde_json::from_str(r#"{"extraction": {"context_window": 4}}"#).unwrap();
        assert_eq!(config.extraction.context_window, 4);
        assert_eq!(config.extraction.correction_penalty, 0.25);
        assert_eq!(config.ocr.detection_model, "det.onnx");
    }
}
