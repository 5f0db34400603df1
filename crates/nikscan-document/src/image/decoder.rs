// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image decoding seam — file bytes in, 8-bit RGB pixel buffer out.

use std::path::Path;

use image::RgbImage;
use nikscan_core::error::{NikScanError, Result};
use nikscan_core::types::ImageRecord;
use tracing::{debug, instrument};

/// Turns encoded image bytes into an RGB pixel buffer.
///
/// Every decoder hands back three 8-bit channels, whatever the source format
/// (grayscale, RGBA, 16-bit PNG, ...), so the normaliser never sees any other
/// channel layout.
pub trait ImageDecoder {
    /// Decode `bytes` into an RGB buffer.
    ///
    /// # Errors
    ///
    /// Returns [`NikScanError::ImageError`] if the bytes are not a readable image.
    fn decode(&self, bytes: &[u8]) -> Result<RgbImage>;

    /// Read and decode a file into an [`ImageRecord`].
    ///
    /// An unreadable file is reported as [`NikScanError::ImageError`] too: to
    /// the batch it is just another image that could not be loaded.
    #[instrument(skip_all, fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<ImageRecord> {
        let bytes = std::fs::read(path).map_err(|err| {
            NikScanError::ImageError(format!("failed to read {}: {}", path.display(), err))
        })?;
        let pixels = self.decode(&bytes).map_err(|err| match err {
            NikScanError::ImageError(detail) => {
                NikScanError::ImageError(format!("{}: {}", path.display(), detail))
            }
            other => other,
        })?;
        Ok(ImageRecord::new(path, pixels))
    }
}

/// Decoder backed by the `image` crate (JPEG, PNG, and whatever else it was
/// built with).
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDecoder;

impl ImageDecoder for StandardDecoder {
    #[instrument(skip_all, fields(data_len = bytes.len()))]
    fn decode(&self, bytes: &[u8]) -> Result<RgbImage> {
        let img = image::load_from_memory(bytes).map_err(|err| {
            NikScanError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "Image decoded from bytes"
        );
        Ok(img.to_rgb8())
    }
}
