// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `ocrs` OCR backend for nikscan.
//
// Text extraction with the `ocrs` crate, a pure-Rust OCR engine backed by
// neural network models executed via `rten`. `ocrs` ships one Latin-script
// recognition model, which covers Indonesian card text; the language
// identifier passed by the pipeline is logged but does not select a model.
//
// # Feature Gate
//
// This module is only available when the `ocr` feature is enabled:
//
// ```toml
// nikscan-document = { path = "crates/nikscan-document", features = ["ocr"] }
// ```
//
// # Model Setup
//
// The engine requires two model files:
//
// - **Detection model** (`text-detection.rten`) — locates text regions.
// - **Recognition model** (`text-recognition.rten`) — decodes characters.
//
// Running `ocrs-cli` once downloads both to `~/.cache/ocrs/`:
//   ```sh
//   cargo install ocrs-cli
//   ocrs some-card.png
//   ```
//
// The default cache directory is `$XDG_CACHE_HOME/ocrs` (typically `~/.cache/ocrs`).

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage};
use nikscan_core::error::{NikScanError, Result};
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use crate::scan::recognizer::TextRecognizer;

/// Default directory for cached OCR model files.
///
/// Follows the XDG Base Directory specification: `$XDG_CACHE_HOME/ocrs`, falling
/// back to `~/.cache/ocrs` when `XDG_CACHE_HOME` is unset.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Model locations for an [`OcrsRecognizer`].
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Path to the text-detection model file (`.rten`).
    pub detection_model_path: PathBuf,
    /// Path to the text-recognition model file (`.rten`).
    pub recognition_model_path: PathBuf,
}

impl Default for OcrConfig {
    /// Returns a config pointing at the default model cache directory.
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl OcrConfig {
    /// Expects `dir` to contain `text-detection.rten` and `text-recognition.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Verify that both model files exist.
    pub fn validate(&self) -> Result<()> {
        for (kind, path) in [
            ("detection", &self.detection_model_path),
            ("recognition", &self.recognition_model_path),
        ] {
            if !path.exists() {
                return Err(NikScanError::OcrInit(format!(
                    "{kind} model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// OCR backend wrapping the `ocrs` engine.
///
/// Loaded once with the pre-trained models, then reused for every card.
pub struct OcrsRecognizer {
    engine: OcrsEngine,
}

impl OcrsRecognizer {
    /// Load the models named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`NikScanError::OcrInit`] if model files are missing or corrupt.
    ///
    /// # Performance
    ///
    /// The `ocrs` and `rten` crates must be compiled in release mode. Debug
    /// builds are 10-100x slower.
    #[instrument(skip_all, fields(
        detection = %config.detection_model_path.display(),
        recognition = %config.recognition_model_path.display(),
    ))]
    pub fn new(config: OcrConfig) -> Result<Self> {
        config.validate()?;

        info!("Loading OCR detection model");
        let detection_model = load_model(&config.detection_model_path, "detection")?;

        info!("Loading OCR recognition model");
        let recognition_model = load_model(&config.recognition_model_path, "recognition")?;

        let engine = OcrsEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| NikScanError::OcrInit(format!("failed to initialise ocrs: {}", err)))?;

        info!("OCR engine initialised successfully");
        Ok(Self { engine })
    }

    /// Load models from the default cache directory.
    pub fn with_defaults() -> Result<Self> {
        Self::new(OcrConfig::default())
    }
}

fn load_model(path: &Path, kind: &str) -> Result<Model> {
    Model::load_file(path).map_err(|err| {
        NikScanError::OcrInit(format!(
            "failed to load {kind} model from {}: {}",
            path.display(),
            err
        ))
    })
}

impl TextRecognizer for OcrsRecognizer {
    fn name(&self) -> &str {
        "ocrs"
    }

    #[instrument(skip_all, fields(width = image.width(), height = image.height(), language = %language))]
    fn recognize(&self, image: &GrayImage, language: &str) -> Result<String> {
        debug!(language, "ocrs uses its built-in Latin model");

        // ocrs expects RGB8.
        let rgb = DynamicImage::ImageLuma8(image.clone()).to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            NikScanError::OcrError(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| NikScanError::OcrError(format!("OCR preprocessing failed: {}", err)))?;

        let text = self.engine.get_text(&input).map_err(|err| {
            NikScanError::OcrError(format!("OCR text recognition failed: {}", err))
        })?;

        debug!(
            line_count = text.lines().count(),
            char_count = text.len(),
            "OCR recognition complete"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_to_cache_dir() {
        let config = OcrConfig::default();
        assert!(
            config
                .detection_model_path
                .to_string_lossy()
                .ends_with(DETECTION_MODEL_FILENAME)
        );
        assert!(
            config
                .recognition_model_path
                .to_string_lossy()
                .ends_with(RECOGNITION_MODEL_FILENAME)
        );
    }

    #[test]
    fn config_from_dir() {
        let config = OcrConfig::from_dir("/tmp/my-models");
        assert_eq!(
            config.detection_model_path,
            PathBuf::from("/tmp/my-models/text-detection.rten")
        );
        assert_eq!(
            config.recognition_model_path,
            PathBuf::from("/tmp/my-models/text-recognition.rten")
        );
    }

    #[test]
    fn missing_models_fail_initialisation() {
        let err = OcrsRecognizer::new(OcrConfig::from_dir("/nonexistent/ocr-models"))
            .err()
            .expect("construction should fail without models");
        assert!(matches!(err, NikScanError::OcrInit(_)));
    }
}
