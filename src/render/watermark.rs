// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tiled watermark layer generation and compositing.
//!
//! The watermark is a transparent RGBA layer the size of the base
//! image, with the watermark text tiled left-to-right, top-to-bottom
//! on a uniform grid starting at the origin. The layer is then
//! alpha-composited onto a copy of the base image; the base itself is
//! never mutated. Preview and save both go through this path, so the
//! same inputs always produce the same output.

use crate::models::watermark::{WatermarkSpec, WATERMARK_ALPHA};
use crate::render::text;
use image::{imageops, DynamicImage, GenericImageView, RgbaImage};

/// Watermark font size is one-twentieth of the smaller canvas dimension.
fn font_px(size: (u32, u32)) -> f32 {
    (size.0.min(size.1) / 20).max(1) as f32
}

/// Number of tiles along one axis: enough to cover the span, plus one
/// so the grid always extends past the far edge. A zero step (empty
/// text) degenerates to a single origin tile instead of dividing by
/// zero.
pub fn repeats(span: u32, step: u32) -> u32 {
    if step > 0 {
        span / step + 1
    } else {
        1
    }
}

/// Render the tiled watermark layer for a canvas of the given size.
pub fn render_layer(size: (u32, u32), spec: &WatermarkSpec) -> RgbaImage {
    let mut layer = RgbaImage::new(size.0, size.1);
    let font = text::watermark_font();
    let px = font_px(size);
    let (text_width, text_height) = text::measure(&font, px, &spec.text);
    let color = spec.mode.color();

    for i in 0..repeats(size.0, text_width) {
        for j in 0..repeats(size.1, text_height) {
            text::draw(
                &mut layer,
                &font,
                px,
                &spec.text,
                (i * text_width, j * text_height),
                color,
                WATERMARK_ALPHA,
            );
        }
    }

    layer
}

/// Composite a freshly rendered watermark layer onto a copy of `base`.
pub fn composite(base: &DynamicImage, spec: &WatermarkSpec) -> RgbaImage {
    let layer = render_layer((base.width(), base.height()), spec);
    let mut out = base.to_rgba8();
    imageops::overlay(&mut out, &layer, 0, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::watermark::WatermarkMode;
    use image::Rgba;

    fn white_base(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255])))
    }

    #[test]
    fn test_repeat_counts() {
        // 100 px span with a 10x20 text box -> 11 columns, 6 rows
        assert_eq!(repeats(100, 10), 11);
        assert_eq!(repeats(100, 20), 6);
    }

    #[test]
    fn test_repeat_zero_step_guard() {
        assert_eq!(repeats(100, 0), 1);
        assert_eq!(repeats(0, 0), 1);
    }

    #[test]
    fn test_grid_covers_canvas() {
        // The extra tile means the grid always extends past the far edge
        for span in [1, 10, 99, 100, 101, 640] {
            for step in [1, 7, 10, 33] {
                assert!(repeats(span, step) * step > span);
            }
        }
    }

    #[test]
    fn test_layer_generation_is_deterministic() {
        let spec = WatermarkSpec::new("Tilemark", WatermarkMode::Dark);
        let a = render_layer((200, 160), &spec);
        let b = render_layer((200, 160), &spec);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_empty_text_layer_is_fully_transparent() {
        let spec = WatermarkSpec::new("", WatermarkMode::Light);
        let layer = render_layer((120, 90), &spec);
        assert!(layer.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_layer_has_visible_text() {
        let spec = WatermarkSpec::new("MARK", WatermarkMode::Dark);
        let layer = render_layer((400, 400), &spec);
        let visible = layer.pixels().filter(|p| p[3] > 0).count();
        assert!(visible > 0);
    }

    #[test]
    fn test_composite_does_not_mutate_base() {
        let base = white_base(300, 300);
        let before = base.to_rgba8();
        let spec = WatermarkSpec::new("MARK", WatermarkMode::Dark);
        let _watermarked = composite(&base, &spec);
        assert_eq!(base.to_rgba8().as_raw(), before.as_raw());
    }

    #[test]
    fn test_composite_changes_pixels_under_text() {
        let base = white_base(300, 300);
        let spec = WatermarkSpec::new("MARK", WatermarkMode::Dark);
        let watermarked = composite(&base, &spec);
        let changed = watermarked
            .pixels()
            .filter(|p| p.0 != [255, 255, 255, 255])
            .count();
        assert!(changed > 0);
    }

    #[test]
    fn test_composite_with_empty_text_is_identity() {
        let base = white_base(100, 80);
        let spec = WatermarkSpec::new("", WatermarkMode::Light);
        let watermarked = composite(&base, &spec);
        assert_eq!(watermarked.as_raw(), base.to_rgba8().as_raw());
    }

    #[test]
    fn test_mode_switch_recomposites_from_source() {
        // Previewing Dark then Light must equal a fresh Light composite;
        // the Dark pass leaves nothing behind.
        let base = white_base(200, 200);
        let dark = WatermarkSpec::new("MARK", WatermarkMode::Dark);
        let light = WatermarkSpec::new("MARK", WatermarkMode::Light);

        let _dark_preview = composite(&base, &dark);
        let after_switch = composite(&base, &light);
        let fresh = composite(&base, &light);
        assert_eq!(after_switch.as_raw(), fresh.as_raw());
    }
}
