// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// nikscan-document — Card image processing and text extraction for nikscan.
//
// Provides image decoding and pixel operations (bicubic rotation with replicated
// borders, sharpening, luminance truncation), the card normalisation pipeline
// (deskew, sharpen, truncate), the OCR seam with its optional backends, and the
// post-OCR text cleanup and NIK matcher.

pub mod image;
pub mod scan;
pub mod text;

// Re-export the primary items so callers can use `nikscan_document::CardEnhancer` etc.
pub use crate::image::decoder::{ImageDecoder, StandardDecoder};
pub use crate::image::processor::ImageProcessor;
pub use crate::scan::enhance::{CardEnhancer, normalize};
pub use crate::scan::recognizer::TextRecognizer;
pub use crate::text::nik::normalize_and_extract;

#[cfg(feature = "ocr")]
pub use crate::scan::ocr::OcrsRecognizer;

#[cfg(feature = "tesseract")]
pub use crate::scan::tesseract::TesseractRecognizer;
