// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for nikscan.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all nikscan operations.
#[derive(Debug, Error)]
pub enum NikScanError {
    // -- Configuration errors --
    #[error("input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error("input path is not a directory: {}", .0.display())]
    InputNotDirectory(PathBuf),

    #[error("no {extensions} images found in {}", dir.display())]
    NoImages { dir: PathBuf, extensions: String },

    // -- Image errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- OCR errors --
    #[error("OCR engine could not be initialised: {0}")]
    OcrInit(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    #[error("no OCR backend compiled in (enable the `ocr` or `tesseract` feature)")]
    OcrUnavailable,

    // -- Output --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NikScanError>;
