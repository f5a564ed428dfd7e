//! OCR seam: images in, raw text out.
//!
//! The pipeline only ever sees an [`OcrProvider`]. Whether one exists is
//! decided by whoever builds the pipeline, never by a global flag.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrProvider;

use crate::error::OcrError;

/// Message reported when an image arrives and no engine is provisioned.
pub const OCR_UNAVAILABLE_REASON: &str =
    "OCR functionality is not available - provide OCR models or a plain text input instead.";

/// A text recognition engine.
pub trait OcrProvider {
    /// Recognize text in encoded image bytes (PNG, JPEG, ...).
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;

    /// Human-readable engine name for logs.
    fn name(&self) -> &str {
        "ocr"
    }
}
