// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — card normalisation and optical character recognition (OCR).

pub mod enhance;
pub mod recognizer;

#[cfg(feature = "ocr")]
pub mod ocr;

#[cfg(feature = "tesseract")]
pub mod tesseract;

pub use enhance::CardEnhancer;
pub use recognizer::TextRecognizer;

#[cfg(feature = "ocr")]
pub use ocr::OcrsRecognizer;

#[cfg(feature = "tesseract")]
pub use self::tesseract::TesseractRecognizer;
