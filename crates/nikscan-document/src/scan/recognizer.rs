// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR seam — a normalised single-channel image in, recognised text out.

use image::GrayImage;
use nikscan_core::error::Result;

/// An OCR engine.
///
/// Implementations are built once per run (model loading is the expensive
/// part) and then called for every image. Construction failures are fatal to
/// the batch; a failing [`recognize`](Self::recognize) only loses that image.
pub trait TextRecognizer {
    /// Short backend name for logs (e.g. `"tesseract"`).
    fn name(&self) -> &str;

    /// Recognise the text in `image` using the language model `language`
    /// (e.g. `"ind"` for Indonesian).
    ///
    /// Returns one block of text with lines separated by `\n`.
    ///
    /// # Errors
    ///
    /// Returns [`NikScanError::OcrError`](nikscan_core::NikScanError::OcrError)
    /// if the engine fails on this image.
    fn recognize(&self, image: &GrayImage, language: &str) -> Result<String>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image: &GrayImage, language: &str) -> Result<String> {
        (**self).recognize(image, language)
    }
}
