// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tesseract OCR backend for nikscan.
//
// Uses the system Tesseract library through the `tesseract` crate. Unlike the
// `ocrs` backend, the language identifier selects the traineddata file, so
// `ind` loads `ind.traineddata` (Indonesian).
//
// # Feature Gate
//
// Only available with the `tesseract` feature. Building needs the Tesseract
// and Leptonica development libraries installed.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use ::tesseract::Tesseract;
use image::GrayImage;
use nikscan_core::error::{NikScanError, Result};
use tracing::{debug, info, instrument};

use crate::scan::recognizer::TextRecognizer;

/// Well-known tessdata locations, checked after `TESSDATA_PREFIX`.
const COMMON_TESSDATA_DIRS: [&str; 5] = [
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

/// Find a tessdata directory holding `<language>.traineddata`.
///
/// Returns `None` to let Tesseract fall back to its compiled-in default.
pub fn tessdata_dir(language: &str) -> Option<PathBuf> {
    let traineddata = format!("{language}.traineddata");

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let prefix = PathBuf::from(prefix);
        for candidate in [prefix.join("tessdata"), prefix] {
            if candidate.join(&traineddata).exists() {
                return Some(candidate);
            }
        }
    }

    COMMON_TESSDATA_DIRS
        .iter()
        .map(Path::new)
        .find(|dir| dir.join(&traineddata).exists())
        .map(Path::to_path_buf)
}

/// OCR backend driving Tesseract.
///
/// The handle opened at construction is kept and reused for every image:
/// each frame is attached with `set_frame`, which replaces the previous one.
/// A call with a different language opens a new handle for that language.
pub struct TesseractRecognizer {
    datapath: Option<String>,
    handle: RefCell<Option<(String, Tesseract)>>,
}

impl TesseractRecognizer {
    /// Locate the data for `language` and load it.
    ///
    /// # Errors
    ///
    /// Returns [`NikScanError::OcrInit`] if Tesseract cannot be initialised
    /// for `language`.
    #[instrument]
    pub fn new(language: &str) -> Result<Self> {
        let datapath = tessdata_dir(language).map(|dir| dir.to_string_lossy().into_owned());
        info!(datapath = ?datapath, "Initialising Tesseract");

        let tess = open(datapath.as_deref(), language).map_err(NikScanError::OcrInit)?;

        Ok(Self {
            datapath,
            handle: RefCell::new(Some((language.to_string(), tess))),
        })
    }

    /// Take the cached handle for `language`, opening one if needed.
    fn take_handle(&self, language: &str) -> Result<Tesseract> {
        match self.handle.borrow_mut().take() {
            Some((cached, tess)) if cached == language => Ok(tess),
            _ => {
                debug!("Opening Tesseract handle");
                open(self.datapath.as_deref(), language).map_err(NikScanError::OcrError)
            }
        }
    }
}

fn open(datapath: Option<&str>, language: &str) -> std::result::Result<Tesseract, String> {
    Tesseract::new(datapath, Some(language))
        .map_err(|err| format!("failed to initialise tesseract for language `{language}`: {err}"))
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &str {
        "tesseract"
    }

    #[instrument(skip_all, fields(width = image.width(), height = image.height(), language = %language))]
    fn recognize(&self, image: &GrayImage, language: &str) -> Result<String> {
        let (width, height) = image.dimensions();
        let (width, height) = (
            i32::try_from(width).map_err(|_| too_large(width, height))?,
            i32::try_from(height).map_err(|_| too_large(width, height))?,
        );

        // One byte per pixel, rows tightly packed. A failed attach drops the
        // handle; the next image opens a fresh one.
        let mut tess = self
            .take_handle(language)?
            .set_frame(image.as_raw(), width, height, 1, width)
            .map_err(|err| NikScanError::OcrError(format!("failed to attach image: {err}")))?;

        let text = tess.get_text();
        *self.handle.borrow_mut() = Some((language.to_string(), tess));
        let text =
            text.map_err(|err| NikScanError::OcrError(format!("text recognition failed: {err}")))?;

        debug!(line_count = text.lines().count(), "Tesseract recognition complete");
        Ok(text)
    }
}

fn too_large(width: u32, height: u32) -> NikScanError {
    NikScanError::OcrError(format!("image too large for tesseract: {width}x{height}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_has_no_tessdata() {
        assert!(tessdata_dir("no-such-language-xyz").is_none());
    }

    #[test]
    fn handle_is_reused_across_images() {
        // Needs an installed traineddata; skip quietly on machines without one.
        let Some(language) = ["ind", "eng"].into_iter().find(|l| tessdata_dir(l).is_some()) else {
            return;
        };
        let recognizer = TesseractRecognizer::new(language).unwrap();
        let page = GrayImage::from_pixel(64, 32, image::Luma([127]));

        recognizer.recognize(&page, language).unwrap();
        recognizer.recognize(&page, language).unwrap();

        let cached = recognizer.handle.borrow();
        assert_eq!(cached.as_ref().map(|(l, _)| l.as_str()), Some(language));
    }

    #[test]
    fn unknown_language_fails_initialisation() {
        let err = TesseractRecognizer::new("no-such-language-xyz")
            .err()
            .expect("construction should fail without traineddata");
        assert!(matches!(err, NikScanError::OcrInit(_)));
    }
}
