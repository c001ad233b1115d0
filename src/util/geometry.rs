// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the aspect-preserving fit computation used to
//! size the preview, plus the resampling step that produces the
//! display bitmap.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Compute the largest size that preserves the source aspect ratio and
/// fits entirely within the given bounds.
///
/// One output dimension equals the corresponding bound exactly; the
/// other is derived from the source aspect ratio and truncated, so the
/// result never exceeds the bounds. Zero-sized sources or bounds yield
/// (0, 0) rather than dividing by zero.
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = source;
    let (bw, bh) = bounds;
    if sw == 0 || sh == 0 || bw == 0 || bh == 0 {
        return (0, 0);
    }

    let source_ratio = sw as f64 / sh as f64;
    let bounds_ratio = bw as f64 / bh as f64;

    if bounds_ratio > source_ratio {
        // Bounds are relatively wider than the source - fit by height
        let new_height = bh;
        let new_width = (new_height as f64 * source_ratio) as u32;
        (new_width.max(1), new_height)
    } else {
        // Fit by width
        let new_width = bw;
        let new_height = (new_width as f64 / source_ratio) as u32;
        (new_width, new_height.max(1))
    }
}

/// Resample an RGBA bitmap to the given size with a high-quality filter.
pub fn resample(image: &RgbaImage, size: (u32, u32)) -> RgbaImage {
    imageops::resize(image, size.0, size.1, FilterType::Lanczos3)
}
