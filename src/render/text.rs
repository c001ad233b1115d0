// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text measurement and glyph drawing.
//!
//! This module wraps the embedded watermark font and provides the two
//! primitives the compositor needs: measuring the pixel box of a
//! rendered string and drawing that string onto a transparent RGBA
//! layer with a fixed fill color and alpha.

use ab_glyph::{point, Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// The font used for all watermark text.
pub fn watermark_font() -> FontRef<'static> {
    // The font is embedded in the binary; parsing it cannot fail at runtime.
    FontRef::try_from_slice(FONT_BYTES).expect("embedded font is valid")
}

/// Measure the pixel bounding box of `text` rendered at `px` pixels.
///
/// Width is the sum of horizontal glyph advances, height the scaled
/// font height. Empty text measures (0, 0).
pub fn measure(font: &FontRef<'_>, px: f32, text: &str) -> (u32, u32) {
    if text.is_empty() {
        return (0, 0);
    }
    let scaled = font.as_scaled(PxScale::from(px));
    let width: f32 = text
        .chars()
        .map(|c| scaled.h_advance(font.glyph_id(c)))
        .sum();
    (width.ceil() as u32, scaled.height().ceil() as u32)
}

/// Draw `text` onto `layer` with its box's top-left corner at `origin`.
///
/// Glyph coverage is scaled by `alpha` and blended over whatever the
/// layer already holds at that pixel, so slightly overlapping glyphs
/// accumulate rather than overwrite.
pub fn draw(
    layer: &mut RgbaImage,
    font: &FontRef<'_>,
    px: f32,
    text: &str,
    origin: (u32, u32),
    color: [u8; 3],
    alpha: u8,
) {
    let scale = PxScale::from(px);
    let scaled = font.as_scaled(scale);
    let baseline = origin.1 as f32 + scaled.ascent();
    let mut pen_x = origin.0 as f32;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        let advance = scaled.h_advance(glyph_id);
        let glyph = glyph_id.with_scale_and_position(scale, point(pen_x, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                blend_coverage(layer, x, y, color, coverage * alpha as f32 / 255.0);
            });
        }
        pen_x += advance;
    }
}

/// Blend a single-color pixel with the given alpha (0.0-1.0) over the layer.
fn blend_coverage(layer: &mut RgbaImage, x: i32, y: i32, color: [u8; 3], src_alpha: f32) {
    if x < 0 || y < 0 || x >= layer.width() as i32 || y >= layer.height() as i32 {
        return;
    }
    let src_a = src_alpha.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let pixel = layer.get_pixel_mut(x as u32, y as u32);
    let dst_a = pixel[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    *pixel = Rgba([color[0], color[1], color[2], (out_a * 255.0).round() as u8]);
}
