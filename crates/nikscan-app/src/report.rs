// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch results and the two output files.

use std::path::Path;

use nikscan_core::config::ScanConfig;
use nikscan_core::error::Result;
use nikscan_core::types::{NikRecord, RunSummary, TranscriptEntry};
use tracing::{info, instrument, warn};

/// Everything collected while walking the batch, in processing order.
#[derive(Debug, Default)]
pub struct ScanResults {
    discovered: usize,
    transcripts: Vec<TranscriptEntry>,
    niks: Vec<NikRecord>,
    skipped: usize,
}

impl ScanResults {
    pub fn new(discovered: usize) -> Self {
        Self {
            discovered,
            ..Self::default()
        }
    }

    /// Append one processed image.
    pub fn record(&mut self, entry: TranscriptEntry, niks: Vec<NikRecord>) {
        self.transcripts.push(entry);
        self.niks.extend(niks);
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Sections joined by a blank line, in processing order.
    pub fn transcript_text(&self) -> String {
        self.transcripts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write both outputs and summarise the run.
    ///
    /// The transcript is always (over)written. The table is written only if
    /// at least one NIK was found; otherwise any existing table is left as is.
    #[instrument(skip_all)]
    pub fn write(self, config: &ScanConfig) -> Result<RunSummary> {
        write_transcript(&config.transcript_output, &self.transcript_text())?;

        let table_path = if self.niks.is_empty() {
            warn!("No NIK detected, table not written");
            None
        } else {
            write_table(&config.table_output, &self.niks)?;
            Some(config.table_output.clone())
        };

        Ok(RunSummary {
            discovered: self.discovered,
            processed: self.transcripts.len(),
            skipped: self.skipped,
            nik_count: self.niks.len(),
            transcript_path: config.transcript_output.clone(),
            table_path,
        })
    }
}

pub fn write_transcript(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text)?;
    info!(path = %path.display(), "Transcript saved");
    Ok(())
}

/// Write `records` as a `file,nik` table, one row per detection, CRLF
/// terminated.
pub fn write_table(path: &Path, records: &[NikRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = records.len(), "NIK table saved");
    Ok(())
}

/// Console summary for the operator.
pub fn log_summary(summary: &RunSummary) {
    info!(
        discovered = summary.discovered,
        processed = summary.processed,
        skipped = summary.skipped,
        "OCR finished"
    );
    info!("Full text saved to: {}", summary.transcript_path.display());
    match &summary.table_path {
        Some(path) => info!("NIK list saved to: {} ({} entries)", path.display(), summary.nik_count),
        None => info!("No NIK detected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file: &str, lines: &[&str]) -> TranscriptEntry {
        TranscriptEntry::new(file, lines.iter().map(|l| l.to_string()))
    }

    fn nik(file: &str, nik: &str) -> NikRecord {
        NikRecord::new(file, nik).unwrap()
    }

    #[test]
    fn transcript_sections_are_separated_by_a_blank_line() {
        let mut results = ScanResults::new(2);
        results.record(entry("a.jpg", &["PROVINSI", "KOTA"]), vec![]);
        results.record(entry("b.png", &["NIK:3271045678901237"]), vec![]);

        assert_eq!(
            results.transcript_text(),
            "===== a.jpg =====\nPROVINSI\nKOTA\n\n===== b.png =====\nNIK:3271045678901237\n"
        );
    }

    #[test]
    fn image_without_text_still_gets_a_header() {
        let mut results = ScanResults::new(1);
        results.record(entry("blank.png", &[]), vec![]);
        assert_eq!(results.transcript_text(), "===== blank.png =====\n\n");
    }

    #[test]
    fn table_has_header_and_one_row_per_detection() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nik_list.csv");
        write_table(
            &path,
            &[nik("b.png", "3271045678901237"), nik("b.png", "3174012345678901")],
        )
        .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "file,nik\r\nb.png,3271045678901237\r\nb.png,3174012345678901\r\n"
        );
    }

    #[test]
    fn no_niks_leaves_an_old_table_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ScanConfig::default().with_output_directory(tmp.path());
        std::fs::write(&config.table_output, "file,nik\r\nold.jpg,1111222233334444\r\n").unwrap();

        let mut results = ScanResults::new(1);
        results.record(entry("a.jpg", &["no number here"]), vec![]);
        let summary = results.write(&config).unwrap();

        assert_eq!(summary.table_path, None);
        assert_eq!(summary.nik_count, 0);
        assert!(config.transcript_output.exists());
        assert_eq!(
            std::fs::read_to_string(&config.table_output).unwrap(),
            "file,nik\r\nold.jpg,1111222233334444\r\n"
        );
    }

    #[test]
    fn summary_counts_processed_and_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ScanConfig::default().with_output_directory(tmp.path());

        let mut results = ScanResults::new(3);
        results.skip();
        results.record(entry("a.jpg", &["NIK 3271045678901237"]), vec![nik("a.jpg", "3271045678901237")]);
        results.record(entry("b.jpg", &["x"]), vec![]);
        let summary = results.write(&config).unwrap();

        assert_eq!(summary.discovered, 3);
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.nik_count, 1);
        assert_eq!(summary.table_path.as_deref(), Some(config.table_output.as_path()));
    }
}
