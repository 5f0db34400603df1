// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the identity-card OCR pipeline.

use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Length of an Indonesian national identification number.
pub const NIK_LENGTH: usize = 16;

/// Image file extensions picked up from the input folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageExtension {
    Jpg,
    Png,
    Jpeg,
}

impl ImageExtension {
    /// Extensions in the order the input folder is queried.
    pub const SCAN_ORDER: [ImageExtension; 3] = [Self::Jpg, Self::Png, Self::Jpeg];

    /// The extension as it must appear on disk (matched case-sensitively).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    /// Exact-case match of a path's extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.as_str())
    }

    /// `.jpg/.png/.jpeg`, for messages.
    pub fn describe_all() -> String {
        Self::SCAN_ORDER
            .iter()
            .map(|ext| format!(".{}", ext.as_str()))
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl std::fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded source image, owned for the duration of its trip through the
/// pipeline and dropped after OCR.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    /// File name (no directory), used to label transcript sections and rows.
    pub name: String,
    pub path: PathBuf,
    /// Height × width × RGB, 8 bits per channel.
    pub pixels: RgbImage,
}

impl ImageRecord {
    pub fn new(path: impl Into<PathBuf>, pixels: RgbImage) -> Self {
        let path = path.into();
        Self {
            name: file_name_of(&path),
            path,
            pixels,
        }
    }
}

/// File name of `path` as a display string.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// The cleaned OCR text of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    file: String,
    lines: Vec<String>,
}

impl TranscriptEntry {
    /// Build an entry, dropping any empty or whitespace-only line.
    pub fn new(file: impl Into<String>, lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            file: file.into(),
            lines: lines
                .into_iter()
                .filter(|line| !line.trim().is_empty())
                .collect(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Renders the transcript section: a `===== name =====` header, the lines,
/// and a trailing newline.
impl std::fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== {} =====", self.file)?;
        writeln!(f, "{}", self.lines.join("\n"))
    }
}

/// One detected NIK and the image it came from. Serialises as a `file,nik` row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NikRecord {
    file: String,
    nik: String,
}

impl NikRecord {
    /// Returns `None` unless `nik` is exactly sixteen ASCII digits.
    pub fn new(file: impl Into<String>, nik: impl Into<String>) -> Option<Self> {
        let nik = nik.into();
        if !is_valid_nik(&nik) {
            return None;
        }
        Some(Self {
            file: file.into(),
            nik,
        })
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn nik(&self) -> &str {
        &self.nik
    }
}

/// Exactly [`NIK_LENGTH`] ASCII digits, nothing else.
pub fn is_valid_nik(candidate: &str) -> bool {
    candidate.len() == NIK_LENGTH && candidate.bytes().all(|b| b.is_ascii_digit())
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Files matching the recognised extensions.
    pub discovered: usize,
    /// Images that made it through OCR.
    pub processed: usize,
    /// Images skipped because they could not be decoded or recognised.
    pub skipped: usize,
    pub nik_count: usize,
    pub transcript_path: PathBuf,
    /// `None` when no NIK was detected and the table was not written.
    pub table_path: Option<PathBuf>,
}
