// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch driver: discover, normalise, recognise, extract, write.

use std::path::Path;

use nikscan_core::config::ScanConfig;
use nikscan_core::error::Result;
use nikscan_core::human_errors::{Severity, humanize_error};
use nikscan_core::types::{NikRecord, RunSummary, TranscriptEntry, file_name_of};
use nikscan_document::{CardEnhancer, ImageDecoder, TextRecognizer, normalize_and_extract};
use tracing::{info, instrument, warn};

use crate::discovery::discover_images;
use crate::report::ScanResults;

/// Run one batch over `config.input_directory`.
///
/// The folder is checked before `make_recognizer` is called, so a missing or
/// empty folder never pays for engine start-up. Images that fail to decode or
/// recognise are skipped; every other error ends the run.
#[instrument(skip_all, fields(input = %config.input_directory.display()))]
pub fn run<R, F>(config: &ScanConfig, decoder: &dyn ImageDecoder, make_recognizer: F) -> Result<RunSummary>
where
    R: TextRecognizer,
    F: FnOnce(&str) -> Result<R>,
{
    let images = discover_images(&config.input_directory)?;
    info!("Found {} images in '{}'", images.len(), config.input_directory.display());

    let recognizer = make_recognizer(&config.ocr_language)?;
    info!(backend = recognizer.name(), language = %config.ocr_language, "OCR engine ready");

    let results = images
        .iter()
        .try_fold(ScanResults::new(images.len()), |mut results, path| {
            let name = file_name_of(path);
            info!("Processing: {name}");

            match scan_image(path, decoder, &recognizer, &config.ocr_language) {
                Ok((entry, niks)) => results.record(entry, niks),
                Err(err) if humanize_error(&err).severity == Severity::Skippable => {
                    warn!(file = %name, error = %err, "Skipping image");
                    results.skip();
                }
                Err(err) => return Err(err),
            }
            Ok(results)
        })?;

    results.write(config)
}

/// Decode, normalise and OCR one file, then clean its text.
fn scan_image(
    path: &Path,
    decoder: &dyn ImageDecoder,
    recognizer: &dyn TextRecognizer,
    language: &str,
) -> Result<(TranscriptEntry, Vec<NikRecord>)> {
    let record = decoder.load(path)?;
    let normalized = CardEnhancer::new(record.pixels).normalize();
    let raw = recognizer.recognize(&normalized, language)?;
    Ok(normalize_and_extract(&raw, &record.name))
}
