//! End-to-end amount pipeline: obtain text, tokenize, classify, score, validate.

use tracing::{debug, info, warn};

use crate::amounts::{classify, tokenize, validate_with_tolerance, ConfidenceWeights};
use crate::error::{AmtxError, OcrError, Result};
use crate::models::config::ExtractionConfig;
use crate::models::response::NO_AMOUNTS_REASON;
use crate::models::ExtractionResponse;
use crate::ocr::{OcrProvider, OCR_UNAVAILABLE_REASON};

/// What the caller hands in. An image takes precedence over text.
#[derive(Debug, Clone, Default)]
pub struct DocumentInput {
    /// Plain text to scan.
    pub text: Option<String>,
    /// Encoded image bytes to run through OCR.
    pub image: Option<Vec<u8>>,
    /// Currency echoed back in the response.
    pub currency_hint: Option<String>,
}

impl DocumentInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn from_image(image: Vec<u8>) -> Self {
        Self {
            image: Some(image),
            ..Default::default()
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency_hint = Some(currency.into());
        self
    }

    /// Empty text counts as no text.
    fn is_missing(&self) -> bool {
        self.image.is_none() && self.text.as_deref().is_none_or(str::is_empty)
    }
}

/// Amount extraction pipeline with an optional OCR engine.
pub struct AmountPipeline {
    config: ExtractionConfig,
    ocr: Option<Box<dyn OcrProvider>>,
}

impl AmountPipeline {
    /// Create a text-only pipeline.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config, ocr: None }
    }

    /// Attach an OCR engine for image input.
    pub fn with_ocr(mut self, provider: impl OcrProvider + 'static) -> Self {
        self.ocr = Some(Box::new(provider));
        self
    }

    /// Override the context window size.
    pub fn with_context_window(mut self, window: usize) -> Self {
        self.config.context_window = window;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Whether image input can be processed.
    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    /// Run the full pipeline.
    ///
    /// Only missing input and OCR faults other than an unprovisioned engine
    /// are errors; everything else is reported through the response.
    pub fn run(&self, input: &DocumentInput) -> Result<ExtractionResponse> {
        if input.is_missing() {
            return Err(AmtxError::MissingInput);
        }

        let text = match &input.image {
            Some(image) => match self.recognize(image) {
                Ok(text) => text,
                Err(OcrError::Unavailable(reason)) => {
                    warn!("Image supplied but OCR is unavailable: {}", reason);
                    return Ok(ExtractionResponse::OcrUnavailable { reason });
                }
                Err(e) => return Err(e.into()),
            },
            None => input.text.clone().unwrap_or_default(),
        };

        Ok(self.extract_from_text(&text, input.currency_hint.as_deref()))
    }

    fn recognize(&self, image: &[u8]) -> std::result::Result<String, OcrError> {
        let provider = self
            .ocr
            .as_ref()
            .ok_or_else(|| OcrError::Unavailable(OCR_UNAVAILABLE_REASON.to_string()))?;

        debug!("Running OCR with {} on {} bytes", provider.name(), image.len());
        provider.recognize(image)
    }

    /// Run the text stages on already-obtained text. Never fails.
    pub fn extract_from_text(&self, text: &str, currency_hint: Option<&str>) -> ExtractionResponse {
        let tokenization = tokenize(text, self.config.context_window);
        if tokenization.is_empty() {
            info!("No numeric tokens in {} chars of text", text.len());
            return ExtractionResponse::NoAmountsFound {
                reason: NO_AMOUNTS_REASON.to_string(),
            };
        }

        let amounts = classify(&tokenization.tokens);
        let confidence = ConfidenceWeights::from(&self.config).report(&tokenization.stats, &amounts);
        debug!(
            "Confidence: normalization={:.2} classification={:.2}",
            confidence.normalization, confidence.classification
        );

        let (amounts, validation_status) = validate_with_tolerance(amounts, self.config.tolerance);

        info!("Extracted {} amounts ({})", amounts.len(), validation_status);

        ExtractionResponse::Ok {
            confidence: confidence.overall,
            currency: currency_hint
                .map(str::to_string)
                .unwrap_or_else(|| self.config.default_currency.clone()),
            amounts,
            validation_status,
        }
    }
}

impl Default for AmountPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}
