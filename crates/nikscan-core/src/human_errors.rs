// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the operator running a batch.
//
// Every technical error is mapped to a plain message with a clear suggestion.
// The severity decides whether the batch stops or moves on to the next image.

use crate::error::NikScanError;

/// What an error means for the running batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Only the current image is lost; the batch continues.
    Skippable,
    /// The batch cannot start or cannot finish.
    Fatal,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the operator should try.
    pub suggestion: String,
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `NikScanError` into a `HumanError`.
pub fn humanize_error(err: &NikScanError) -> HumanError {
    match err {
        NikScanError::InputDirMissing(dir) => HumanError {
            message: format!("Folder '{}' was not found.", dir.display()),
            suggestion: "Create the folder and put the scanned cards inside it.".into(),
            severity: Severity::Fatal,
        },

        NikScanError::InputNotDirectory(path) => HumanError {
            message: format!("'{}' is a file, not a folder.", path.display()),
            suggestion: "Put the scanned cards in a folder with that name instead.".into(),
            severity: Severity::Fatal,
        },

        NikScanError::NoImages { dir, extensions } => HumanError {
            message: format!("There are no {extensions} images in '{}'.", dir.display()),
            suggestion: "Check the file extensions; they are matched exactly (lowercase).".into(),
            severity: Severity::Fatal,
        },

        NikScanError::ImageError(detail) => HumanError {
            message: "An image could not be read.".into(),
            suggestion: format!("The file may be damaged or not really an image. ({detail})"),
            severity: Severity::Skippable,
        },

        NikScanError::OcrInit(detail) => HumanError {
            message: "The OCR engine could not start.".into(),
            suggestion: format!(
                "Make sure the OCR model files or language data are installed. ({detail})"
            ),
            severity: Severity::Fatal,
        },

        NikScanError::OcrError(detail) => HumanError {
            message: "Text recognition failed for an image.".into(),
            suggestion: format!("Try a sharper scan of this card. ({detail})"),
            severity: Severity::Skippable,
        },

        NikScanError::OcrUnavailable => HumanError {
            message: "This build has no OCR engine.".into(),
            suggestion: "Rebuild with `--features ocr` or `--features tesseract`.".into(),
            severity: Severity::Fatal,
        },

        NikScanError::Io(io) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check folder permissions and free disk space. ({io})"),
            severity: Severity::Fatal,
        },

        NikScanError::Csv(csv) => HumanError {
            message: "The NIK table could not be written.".into(),
            suggestion: format!("Close the CSV file if it is open in another program. ({csv})"),
            severity: Severity::Fatal,
        },
    }
}
