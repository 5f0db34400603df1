// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card normalisation pipeline — deskew, sharpen, and luminance truncation for
// scanned identity cards ahead of OCR.

use image::{GrayImage, RgbImage};
use imageproc::point::Point;
use tracing::{debug, info, instrument};

use crate::image::geometry::min_area_rect;
use crate::image::processor::{ImageProcessor, SHARPEN_KERNEL, luminance, truncate};

/// Luminance ceiling applied by [`CardEnhancer::truncate`].
pub const TRUNCATE_LEVEL: u8 = 127;

/// Corrections smaller than this (degrees) are not worth resampling for.
const MIN_ROTATION_DEGREES: f64 = 1e-6;

/// Prepares a scanned card for OCR.
///
/// The steps always run in the same order: deskew the colour image, sharpen
/// it, then convert to luminance and truncate bright values. The output keeps
/// the input's dimensions.
///
/// ```ignore
/// let ready: GrayImage = CardEnhancer::new(record.pixels)
///     .deskew()
///     .sharpen()
///     .truncate();
/// ```
pub struct CardEnhancer {
    /// The working image.
    image: RgbImage,
}

impl CardEnhancer {
    // -- Construction ---------------------------------------------------------

    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn into_rgb(self) -> RgbImage {
        self.image
    }

    // -- Pipeline stages ------------------------------------------------------

    /// Rotate the card so its content box is level.
    ///
    /// The minimum-area rectangle around every non-zero luminance pixel gives
    /// the skew; see [`skew_correction`]. An all-black image is returned
    /// unchanged.
    #[instrument(skip(self))]
    pub fn deskew(self) -> Self {
        let gray = luminance(&self.image);
        let image = self.image;

        let Some(correction) = skew_correction(&gray) else {
            debug!("No foreground pixels; skipping deskew");
            return Self { image };
        };

        if correction.abs() < MIN_ROTATION_DEGREES {
            debug!(correction, "Card already level");
            return Self { image };
        }

        info!(correction, "Deskewing card");
        let rotated = ImageProcessor::from_rgb(image)
            .rotate_replicate(correction)
            .into_rgb();
        Self { image: rotated }
    }

    /// Apply the fixed sharpening kernel (centre 5, four neighbours -1).
    #[instrument(skip(self))]
    pub fn sharpen(self) -> Self {
        info!("Sharpening card");
        let sharpened = ImageProcessor::from_rgb(self.image)
            .filter3x3(&SHARPEN_KERNEL)
            .into_rgb();
        Self { image: sharpened }
    }

    /// Convert to luminance and clamp everything brighter than
    /// [`TRUNCATE_LEVEL`] down to it.
    ///
    /// This is a truncation, not a black/white threshold: darker tones keep
    /// their value, only the bright card background is flattened.
    #[instrument(skip(self))]
    pub fn truncate(self) -> GrayImage {
        info!(level = TRUNCATE_LEVEL, "Truncating luminance");
        let gray = ImageProcessor::from_rgb(self.image).luminance();
        truncate(&gray, TRUNCATE_LEVEL)
    }

    /// Run deskew, sharpen, and truncate in order.
    pub fn normalize(self) -> GrayImage {
        self.deskew().sharpen().truncate()
    }
}

/// Normalise decoded card pixels for OCR. The caller's buffer is left as-is.
pub fn normalize(pixels: &RgbImage) -> GrayImage {
    CardEnhancer::new(pixels.clone()).normalize()
}

/// Counter-clockwise rotation (degrees) that levels the content of `gray`, or
/// `None` if the image has no non-zero pixel.
///
/// Points are taken in (row, column) order. The enclosing rectangle's angle θ
/// is folded into `[-90, 0)`; below -45° the box is read against the other
/// axis and the correction is `-(90 + θ)`, otherwise it is `-θ`. The result
/// always lies in `[-45, 45]`, so text is never turned on its side.
pub fn skew_correction(gray: &GrayImage) -> Option<f64> {
    let points = foreground_extremes(gray);
    let rect = min_area_rect(&points)?;

    let theta = rect.legacy_angle();
    let correction = if theta < -45.0 { -(90.0 + theta) } else { -theta };
    debug!(
        theta,
        correction,
        width = rect.width,
        height = rect.height,
        "Skew measured"
    );
    Some(correction)
}

/// The first and last non-zero pixel of every row, as (row, column) points.
///
/// The convex hull of these is the hull of the whole foreground, at a
/// fraction of the points.
fn foreground_extremes(gray: &GrayImage) -> Vec<Point<f64>> {
    let width = gray.width() as usize;
    let mut points = Vec::new();
    if width == 0 {
        return points;
    }

    for (row, pixels) in gray.as_raw().chunks_exact(width).enumerate() {
        let first = pixels.iter().position(|&v| v > 0);
        let last = pixels.iter().rposition(|&v| v > 0);
        if let (Some(first), Some(last)) = (first, last) {
            points.push(Point::new(row as f64, first as f64));
            if last != first {
                points.push(Point::new(row as f64, last as f64));
            }
        }
    }
    points
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    /// A bright band, `half_len` by `half_thick`, centred in a black canvas and
    /// tilted `degrees` clockwise as seen on screen.
    fn tilted_band(size: u32, degrees: f64, half_len: f64, half_thick: f64) -> RgbImage {
        let (s, c) = degrees.to_radians().sin_cos();
        let centre = size as f64 / 2.0;
        RgbImage::from_fn(size, size, |x, y| {
            let dx = x as f64 - centre;
            let dy = y as f64 - centre;
            let along = dx * c + dy * s;
            let across = -dx * s + dy * c;
            if along.abs() <= half_len && across.abs() <= half_thick {
                Rgb([230, 230, 230])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn all_black_image_is_not_deskewed() {
        let img = RgbImage::from_pixel(30, 20, Rgb([0, 0, 0]));
        let out = CardEnhancer::new(img.clone()).deskew().into_rgb();
        assert_eq!(out, img);
        assert!(skew_correction(&GrayImage::new(30, 20)).is_none());
    }

    #[test]
    fn level_content_needs_no_rotation() {
        let mut img = RgbImage::from_pixel(40, 30, Rgb([0, 0, 0]));
        for y in 10..20 {
            for x in 5..35 {
                img.put_pixel(x, y, Rgb([200, 200, 200]));
            }
        }
        let gray = ImageProcessor::from_rgb(img.clone()).luminance();
        assert_eq!(skew_correction(&gray), Some(0.0));
        assert_eq!(CardEnhancer::new(img.clone()).deskew().into_rgb(), img);
    }

    #[test]
    fn clockwise_tilt_gets_counter_clockwise_correction() {
        let img = tilted_band(200, 10.0, 70.0, 12.0);
        let gray = ImageProcessor::from_rgb(img).luminance();
        let correction = skew_correction(&gray).unwrap();
        assert!((correction - 10.0).abs() < 1.5, "got {correction}");
    }

    #[test]
    fn counter_clockwise_tilt_gets_clockwise_correction() {
        let img = tilted_band(200, -10.0, 70.0, 12.0);
        let gray = ImageProcessor::from_rgb(img).luminance();
        let correction = skew_correction(&gray).unwrap();
        assert!((correction + 10.0).abs() < 1.5, "got {correction}");
    }

    #[test]
    fn correction_never_exceeds_forty_five_degrees() {
        for degrees in [-80.0, -50.0, -30.0, 5.0, 40.0, 60.0, 85.0] {
            let img = tilted_band(160, degrees, 55.0, 10.0);
            let gray = ImageProcessor::from_rgb(img).luminance();
            let correction = skew_correction(&gray).unwrap();
            assert!(correction.abs() <= 45.0, "{degrees} -> {correction}");
        }
    }

    #[test]
    fn deskew_levels_a_tilted_band() {
        let img = tilted_band(200, 8.0, 70.0, 10.0);
        let levelled = CardEnhancer::new(img).deskew().into_rgb();
        let gray = ImageProcessor::from_rgb(levelled).luminance();
        // Black corners stay black after rotation (edge replication copies the
        // black border), so the band is measured again on its own.
        let residual = skew_correction(&gray).unwrap();
        assert!(residual.abs() < 2.0, "residual skew {residual}");
    }

    #[test]
    fn normalize_keeps_dimensions_and_caps_luminance() {
        let img = RgbImage::from_fn(50, 30, |x, y| Rgb([(x * 5) as u8, (y * 8) as u8, 255]));
        let out = normalize(&img);
        assert_eq!(out.dimensions(), (50, 30));
        assert!(out.pixels().all(|Luma([v])| *v <= TRUNCATE_LEVEL));
    }

    #[test]
    fn truncate_passes_rec601_tones_through() {
        // Saturated card colours stay below the ceiling and reach OCR as-is.
        for (rgb, expected) in [([255, 0, 0], 76), ([0, 0, 255], 29), ([200, 90, 40], 117)] {
            let out = CardEnhancer::new(RgbImage::from_pixel(3, 3, Rgb(rgb))).truncate();
            assert!(out.pixels().all(|Luma([v])| *v == expected), "{rgb:?}");
        }
    }

    #[test]
    fn deskew_mask_sees_dim_blue_content() {
        // Blue (0, 0, 5) has Rec. 601 luminance 1, so it counts as foreground.
        let mut img = RgbImage::from_pixel(20, 10, Rgb([0, 0, 0]));
        img.put_pixel(4, 3, Rgb([0, 0, 5]));
        let gray = luminance(&img);
        assert_eq!(gray.get_pixel(4, 3).0[0], 1);
        assert!(skew_correction(&gray).is_some());
    }

    #[test]
    fn truncate_keeps_dark_tones() {
        let img = RgbImage::from_fn(16, 1, |x, _| {
            let v = (x * 16) as u8;
            Rgb([v, v, v])
        });
        let gray = ImageProcessor::from_rgb(img.clone()).luminance();
        let out = CardEnhancer::new(img).truncate();
        for (before, after) in gray.pixels().zip(out.pixels()) {
            if before.0[0] < TRUNCATE_LEVEL {
                assert_eq!(before, after);
            } else {
                assert_eq!(after.0[0], TRUNCATE_LEVEL);
            }
        }
    }

    #[test]
    fn foreground_extremes_keeps_two_points_per_row() {
        let mut gray = GrayImage::new(10, 3);
        gray.put_pixel(2, 0, Luma([1]));
        gray.put_pixel(5, 0, Luma([1]));
        gray.put_pixel(7, 0, Luma([1]));
        gray.put_pixel(4, 2, Luma([9]));

        let points = foreground_extremes(&gray);
        assert_eq!(
            points,
            vec![Point::new(0.0, 2.0), Point::new(0.0, 7.0), Point::new(2.0, 4.0)]
        );
    }
}
