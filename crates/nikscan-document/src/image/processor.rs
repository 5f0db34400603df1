// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — rotation with replicated borders, 3x3 convolution,
// luminance, and truncation. Operates on in-memory RGB images using the
// `image` and `imageproc` crates.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors;
use tracing::{debug, info, instrument};

/// Keys' cubic convolution parameter. `-0.75` matches the kernel most OCR
/// preprocessing stacks use for bicubic resampling.
const CUBIC_A: f64 = -0.75;

/// Sharpening kernel: centre 5, four neighbours -1, corners 0.
pub const SHARPEN_KERNEL: [i32; 9] = [0, -1, 0, -1, 5, -1, 0, -1, 0];

/// Pixel pipeline operating on a single in-memory RGB image.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`
/// wrapping the result, enabling method chaining.
///
/// ```ignore
/// let gray = ImageProcessor::from_rgb(pixels)
///     .rotate_replicate(4.5)
///     .filter3x3(&SHARPEN_KERNEL)
///     .luminance();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: RgbImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Wrap an already-decoded RGB buffer.
    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Consume the processor and return the underlying buffer.
    pub fn into_rgb(self) -> RgbImage {
        self.image
    }

    /// Single-channel luminance of the current image; see [`luminance`].
    pub fn luminance(&self) -> GrayImage {
        luminance(&self.image)
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Rotate counter-clockwise by `degrees` about the integer centre
    /// `(w / 2, h / 2)`, keeping the canvas size.
    ///
    /// Samples use bicubic interpolation. Positions that fall outside the
    /// source frame take the nearest edge pixel, so no artificial border is
    /// introduced.
    #[instrument(skip(self))]
    pub fn rotate_replicate(self, degrees: f64) -> Self {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 || degrees == 0.0 {
            return self;
        }
        info!(degrees, width, height, "Rotating image");

        let cx = (width / 2) as f64;
        let cy = (height / 2) as f64;
        let (sin, cos) = degrees.to_radians().sin_cos();

        // Inverse mapping: for every destination pixel find its source position.
        let src = &self.image;
        let rotated = RgbImage::from_fn(width, height, |x, y| {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let sx = cos * dx - sin * dy + cx;
            let sy = sin * dx + cos * dy + cy;
            sample_bicubic_replicate(src, sx, sy)
        });

        debug!("Rotation applied");
        Self { image: rotated }
    }

    /// Convolve every channel with a 3x3 kernel (row-major), saturating each
    /// result to `[0, 255]`.
    ///
    /// Borders are reflected without repeating the edge pixel, so row `-1`
    /// reads row `1`.
    #[instrument(skip_all)]
    pub fn filter3x3(self, kernel: &[i32; 9]) -> Self {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return self;
        }
        info!(?kernel, "Applying 3x3 convolution");

        let src = &self.image;
        let filtered = RgbImage::from_fn(width, height, |x, y| {
            let mut acc = [0i32; 3];
            for ky in 0..3u32 {
                let sy = reflect_101(y as i64 + ky as i64 - 1, height);
                for kx in 0..3u32 {
                    let weight = kernel[(ky * 3 + kx) as usize];
                    if weight == 0 {
                        continue;
                    }
                    let sx = reflect_101(x as i64 + kx as i64 - 1, width);
                    let Rgb(channels) = *src.get_pixel(sx, sy);
                    for (sum, value) in acc.iter_mut().zip(channels) {
                        *sum += weight * value as i32;
                    }
                }
            }
            Rgb(acc.map(|sum| sum.clamp(0, 255) as u8))
        });

        Self { image: filtered }
    }
}

/// Rec. 601 luma weights in 14-bit fixed point (R, G, B); they sum to
/// `1 << LUMA_SHIFT`.
const LUMA_WEIGHTS: [u32; 3] = [4899, 9617, 1868];
const LUMA_SHIFT: u32 = 14;

/// Rec. 601 luminance (`0.299 R + 0.587 G + 0.114 B`), computed in fixed
/// point and rounded half up, so pure red maps to 76 and pure blue to 29.
pub fn luminance(rgb: &RgbImage) -> GrayImage {
    map_colors(rgb, |Rgb(channels)| {
        let weighted: u32 = channels
            .iter()
            .zip(LUMA_WEIGHTS)
            .map(|(&value, weight)| value as u32 * weight)
            .sum();
        Luma([((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8])
    })
}

/// Clamp every luminance value above `level` down to `level`; values at or
/// below it pass through unchanged.
pub fn truncate(gray: &GrayImage, level: u8) -> GrayImage {
    map_colors(gray, |Luma([value])| Luma([value.min(level)]))
}

/// Reflect an out-of-range index back into `0..len` (`gfedcb|abcdefgh|gfedcba`).
fn reflect_101(index: i64, len: u32) -> u32 {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut i = index.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as u32
}

/// Keys' cubic convolution weight for a sample at distance `t`.
fn cubic_weight(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        ((CUBIC_A + 2.0) * t - (CUBIC_A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((CUBIC_A * t - 5.0 * CUBIC_A) * t + 8.0 * CUBIC_A) * t - 4.0 * CUBIC_A
    } else {
        0.0
    }
}

/// Bicubic sample at `(sx, sy)` with edge-replicated borders.
fn sample_bicubic_replicate(src: &RgbImage, sx: f64, sy: f64) -> Rgb<u8> {
    let (width, height) = src.dimensions();
    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;

    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let wx: [f64; 4] = std::array::from_fn(|i| cubic_weight(fx - (i as f64 - 1.0)));
    let wy: [f64; 4] = std::array::from_fn(|j| cubic_weight(fy - (j as f64 - 1.0)));

    let mut acc = [0f64; 3];
    for (j, weight_y) in wy.iter().enumerate() {
        let py = (y0 + j as i64 - 1).clamp(0, max_y) as u32;
        for (i, weight_x) in wx.iter().enumerate() {
            let px = (x0 + i as i64 - 1).clamp(0, max_x) as u32;
            let weight = weight_x * weight_y;
            let Rgb(channels) = *src.get_pixel(px, py);
            for (sum, value) in acc.iter_mut().zip(channels) {
                *sum += weight * value as f64;
            }
        }
    }

    Rgb(acc.map(|sum| sum.round().clamp(0.0, 255.0) as u8))
}
