//! WASM bindings for receipt amount extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR runs on the JS side; these bindings take the recognized text.

use wasm_bindgen::prelude::*;

use amtx_core::models::config::ExtractionConfig;
use amtx_core::{AmountPipeline, ExtractionResponse};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(response: &ExtractionResponse) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(response).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract labeled amounts from text.
///
/// Returns the result envelope (`status`, `amounts`, `validation_status`, ...).
#[wasm_bindgen]
pub fn extract_amounts(text: &str, currency_hint: Option<String>) -> Result<JsValue, JsValue> {
    let response = AmountPipeline::default().extract_from_text(text, currency_hint.as_deref());
    to_js(&response)
}

/// Find numeric tokens with their context, without labeling them.
#[wasm_bindgen]
pub fn tokenize_text(text: &str, window: usize) -> Result<JsValue, JsValue> {
    let tokenization = amtx_core::tokenize(text, window);
    serde_wasm_bindgen::to_value(&tokenization.tokens)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply the OCR confusion map to a raw token (e.g. "1OO" -> "100").
#[wasm_bindgen]
pub fn correct_confusables(raw: &str) -> String {
    amtx_core::amounts::correct_confusables(raw)
}

/// Amount extractor class for browser use.
#[wasm_bindgen]
pub struct AmountExtractor {
    config: ExtractionConfig,
}

#[wasm_bindgen]
impl AmountExtractor {
    /// Create a new extractor with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Words of context on each side of a token.
    #[wasm_bindgen]
    pub fn set_context_window(&mut self, window: usize) {
        self.config.context_window = window;
    }

    /// Currency reported when no hint is passed to `extract`.
    #[wasm_bindgen]
    pub fn set_default_currency(&mut self, currency: &str) {
        self.config.default_currency = currency.to_string();
    }

    /// Extract amounts from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, currency_hint: Option<String>) -> Result<JsValue, JsValue> {
        let response = AmountPipeline::new(self.config.clone())
            .extract_from_text(text, currency_hint.as_deref());
        to_js(&response)
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Lines recognized by a browser-side OCR engine.
#[wasm_bindgen]
pub struct OcrLines {
    lines: Vec<String>,
}

#[wasm_bindgen]
impl OcrLines {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append one recognized line.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    /// Get the full text, one line per entry.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Extract amounts from the collected lines.
    #[wasm_bindgen]
    pub fn extract_amounts(&self, currency_hint: Option<String>) -> Result<JsValue, JsValue> {
        extract_amounts(&self.get_text(), currency_hint)
    }
}

impl Default for OcrLines {
    fn default() -> Self {
        Self::new()
    }
}
