// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Post-OCR text handling — artifact cleanup and NIK matching.

pub mod nik;
pub mod normalize;

pub use nik::{find_niks, normalize_and_extract};
pub use normalize::{clean_line, clean_lines};
