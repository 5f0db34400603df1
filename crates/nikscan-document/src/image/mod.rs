// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding, geometry, and pixel-level operations.

pub mod decoder;
pub mod geometry;
pub mod processor;

pub use decoder::{ImageDecoder, StandardDecoder};
pub use processor::ImageProcessor;
