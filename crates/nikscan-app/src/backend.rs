// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR engine selection for the binary.
//
// Tesseract wins when both backends are compiled in, since it is the one that
// honours the language identifier. With neither feature enabled the binary
// still builds but every run stops with `OcrUnavailable`.

use nikscan_core::error::Result;
use nikscan_document::TextRecognizer;

#[cfg(feature = "tesseract")]
pub fn default_recognizer(language: &str) -> Result<Box<dyn TextRecognizer>> {
    let recognizer = nikscan_document::TesseractRecognizer::new(language)?;
    Ok(Box::new(recognizer))
}

#[cfg(all(feature = "ocr", not(feature = "tesseract")))]
pub fn default_recognizer(_language: &str) -> Result<Box<dyn TextRecognizer>> {
    // ocrs ships a single Latin-script model.
    let recognizer = nikscan_document::OcrsRecognizer::with_defaults()?;
    Ok(Box::new(recognizer))
}

#[cfg(not(any(feature = "ocr", feature = "tesseract")))]
pub fn default_recognizer(_language: &str) -> Result<Box<dyn TextRecognizer>> {
    Err(nikscan_core::error::NikScanError::OcrUnavailable)
}
