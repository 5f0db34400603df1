// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for one batch run, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Folder scanned (non-recursively) for card images.
    pub input_directory: PathBuf,
    /// Full OCR transcript, one section per image.
    pub transcript_output: PathBuf,
    /// CSV table of detected NIK numbers (`file,nik`).
    pub table_output: PathBuf,
    /// Language model identifier handed to the OCR engine.
    pub ocr_language: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from("images"),
            transcript_output: PathBuf::from("hasil_ocr.txt"),
            table_output: PathBuf::from("nik_list.csv"),
            ocr_language: "ind".into(),
        }
    }
}

impl ScanConfig {
    /// Same output names and language, different input folder.
    pub fn with_input_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_directory = dir.into();
        self
    }

    /// Place both output artifacts inside `dir`, keeping their file names.
    pub fn with_output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.transcript_output = dir.join(file_name_or(&self.transcript_output, "hasil_ocr.txt"));
        self.table_output = dir.join(file_name_or(&self.table_output, "nik_list.csv"));
        self
    }
}

fn file_name_or(path: &std::path::Path, fallback: &str) -> PathBuf {
    path.file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(fallback))
}
