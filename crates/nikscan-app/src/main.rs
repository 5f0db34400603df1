// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// nikscan — batch OCR of identity-card scans
//
// Entry point. Initialises logging, then runs one batch over `images/` with
// the compiled-in OCR backend, writing `hasil_ocr.txt` and `nik_list.csv` to
// the working directory.

mod backend;
mod discovery;
mod pipeline;
mod report;

use std::process::ExitCode;

use nikscan_core::config::ScanConfig;
use nikscan_core::human_errors::humanize_error;
use nikscan_document::StandardDecoder;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("nikscan starting");

    let config = ScanConfig::default();
    match pipeline::run(&config, &StandardDecoder, backend::default_recognizer) {
        Ok(summary) => {
            report::log_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let human = humanize_error(&err);
            tracing::error!(error = %err, "{}", human.message);
            eprintln!("{human}");
            ExitCode::FAILURE
        }
    }
}
