// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// NIK matching over cleaned OCR text.

use nikscan_core::types::{NikRecord, TranscriptEntry};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::text::normalize::clean_lines;

/// Exactly sixteen ASCII digits between word boundaries. There is no check
/// digit, so any such run is a candidate.
static NIK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{16}\b").expect("static regex"));

/// Every non-overlapping NIK candidate in `text`, left to right.
pub fn find_niks(text: &str) -> impl Iterator<Item = &str> {
    NIK_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Clean the raw OCR output of one image and pull out its NIK candidates.
///
/// Matching runs over the cleaned lines rejoined with `\n`, so a number can
/// never straddle two lines. Duplicates are kept.
pub fn normalize_and_extract(raw_text: &str, source_name: &str) -> (TranscriptEntry, Vec<NikRecord>) {
    let lines = clean_lines(raw_text);
    let joined = lines.join("\n");

    let niks: Vec<NikRecord> = find_niks(&joined)
        .filter_map(|nik| NikRecord::new(source_name, nik))
        .collect();
    debug!(
        file = source_name,
        lines = lines.len(),
        niks = niks.len(),
        "OCR text normalised"
    );

    (TranscriptEntry::new(source_name, lines), niks)
}
