//! Pure Rust OCR provider using `pure-onnx-ocr`.

use std::time::Instant;

use image::GenericImageView;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::OcrProvider;

/// OCR provider backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrProvider {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

/// One recognized line with the top-left corner of its region.
struct Line {
    x: f64,
    y: f64,
    text: String,
}

impl PureOcrProvider {
    /// Load the detection model, recognition model and dictionary named in `config`.
    ///
    /// Missing files mean the engine is not provisioned and yield
    /// [`OcrError::Unavailable`]; files that fail to load yield
    /// [`OcrError::ModelLoad`].
    pub fn from_config(config: &OcrConfig) -> Result<Self, OcrError> {
        if !config.enabled {
            return Err(OcrError::Unavailable("OCR disabled in configuration".to_string()));
        }
        if !config.models_present() {
            return Err(OcrError::Unavailable(format!(
                "OCR models not found in {}",
                config.model_dir.display()
            )));
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&config.model_path(&config.detection_model))
            .rec_model_path(&config.model_path(&config.recognition_model))
            .dictionary_path(&config.model_path(&config.dictionary))
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", config.model_dir.display());

        Ok(Self {
            engine,
            keep_unk: config.keep_unk,
        })
    }
}

impl OcrProvider for PureOcrProvider {
    fn recognize(&self, bytes: &[u8]) -> Result<String, OcrError> {
        let start = Instant::now();

        let image = image::load_from_memory(bytes)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        let (width, height) = image.dimensions();
        debug!("Decoded image: {}x{}", width, height);

        let results = self
            .engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let mut lines: Vec<Line> = results
            .iter()
            .map(|r| {
                let (x, y) = r
                    .bounding_box
                    .exterior()
                    .coords()
                    .fold((f64::INFINITY, f64::INFINITY), |(x, y), c| {
                        (x.min(c.x), y.min(c.y))
                    });
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                Line { x, y, text }
            })
            .collect();

        // Reading order: rows of ~20px top to bottom, then left to right.
        lines.sort_by(|a, b| {
            let row_a = (a.y / 20.0) as i64;
            let row_b = (b.y / 20.0) as i64;
            row_a
                .cmp(&row_b)
                .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        });

        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "OCR complete: {} lines in {}ms",
            lines.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }

    fn name(&self) -> &str {
        "pure-onnx-ocr"
    }
}
