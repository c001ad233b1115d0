// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module holds all mutable state - the loaded source image, the
//! selected watermark mode and the preview texture - and wires user
//! actions (upload, mode selection, save) to the loader, compositor
//! and resizer. Every action either fully succeeds or leaves state
//! exactly as it was.

use crate::io::media;
use crate::models::image::SourceImage;
use crate::models::watermark::{WatermarkMode, WatermarkSpec};
use crate::render::watermark;
use crate::ui::{canvas, toolbar};
use crate::util::geometry;
use image::RgbaImage;

const DEFAULT_WATERMARK_TEXT: &str = "Your Watermark Here";

/// Main application state.
pub struct TilemarkApp {
    /// Currently loaded image; never mutated after loading
    source: Option<SourceImage>,

    /// Selected watermark mode; None until the user picks one
    mode: Option<WatermarkMode>,

    /// Watermark text, read at the moment of each preview or save
    watermark_text: String,

    /// Full-resolution watermarked copy backing the preview
    composite: Option<RgbaImage>,

    /// Resampled preview texture for display
    display: Option<egui::TextureHandle>,

    /// Aspect-fit size of the current display texture
    display_size: Option<(u32, u32)>,

    /// Set when the preview must be rebuilt regardless of viewport size
    display_dirty: bool,

    /// Most recent action's failure, shown in the status strip
    error: Option<String>,
}

impl Default for TilemarkApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TilemarkApp {
    /// Create a new Tilemark application instance.
    pub fn new() -> Self {
        Self {
            source: None,
            mode: None,
            watermark_text: DEFAULT_WATERMARK_TEXT.to_string(),
            composite: None,
            display: None,
            display_size: None,
            display_dirty: false,
            error: None,
        }
    }

    /// Replace the loaded image wholesale. Mode selection and any
    /// previous preview are not retained across a new load.
    fn install_source(&mut self, source: SourceImage) {
        log::info!(
            "Loaded image: {} ({}x{})",
            source.name,
            source.dimensions().0,
            source.dimensions().1
        );
        self.source = Some(source);
        self.mode = None;
        self.composite = None;
        self.display_dirty = true;
        self.error = None;
    }

    /// Select a watermark mode and recomposite the preview from the
    /// untouched source. A no-op when no image is loaded.
    fn select_mode(&mut self, mode: WatermarkMode) {
        let Some(source) = &self.source else {
            return;
        };
        let spec = WatermarkSpec::new(self.watermark_text.clone(), mode);
        self.composite = Some(watermark::composite(&source.image, &spec));
        self.mode = Some(mode);
        self.display_dirty = true;
        self.error = None;
    }

    /// Render the full-resolution output for saving, freshly composited
    /// from the untouched source. None when no image or no mode is
    /// selected (save is then a no-op).
    fn render_for_save(&self) -> Option<RgbaImage> {
        let source = self.source.as_ref()?;
        let mode = self.mode?;
        let spec = WatermarkSpec::new(self.watermark_text.clone(), mode);
        Some(watermark::composite(&source.image, &spec))
    }

    /// Open the file picker and load the chosen image. Cancellation and
    /// load failures leave the current image untouched.
    fn upload(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Select an image")
            .add_filter("Image files", &media::OPEN_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        match media::load_image(&path) {
            Ok(source) => self.install_source(source),
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                self.error = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    /// Composite the watermark onto the untouched source and write the
    /// result where the user chooses. A no-op without an image and a
    /// selected mode.
    fn save(&mut self) {
        let Some(output) = self.render_for_save() else {
            return;
        };
        // source is present whenever render_for_save succeeds
        let extension = self
            .source
            .as_ref()
            .map(|s| s.extension.clone())
            .unwrap_or_default();

        let mut dialog = rfd::FileDialog::new()
            .set_file_name(format!("watermarked.{}", extension));
        for format in media::dialog_formats(&extension) {
            dialog = dialog.add_filter(format.label(), format.extensions());
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        let path = media::apply_default_extension(path, &extension);

        match media::save_image(&output, &path) {
            Ok(()) => {
                log::info!("Saved watermarked image to {}", path.display());
                self.error = None;
            }
            Err(e) => {
                log::error!("Failed to save {}: {}", path.display(), e);
                self.error = Some(format!("Failed to save image: {}", e));
            }
        }
    }

    /// Rebuild the display texture when the viewport or the underlying
    /// image changed. Identical viewport sizes leave the texture alone,
    /// so repeated resize events are idempotent.
    fn refresh_display(&mut self, ctx: &egui::Context, viewport: egui::Vec2) {
        let Some(source) = &self.source else {
            return;
        };
        let bounds = (viewport.x.floor() as u32, viewport.y.floor() as u32);
        if bounds.0 == 0 || bounds.1 == 0 {
            return;
        }

        let fit = geometry::fit_within(source.dimensions(), bounds);
        if !self.display_dirty && self.display_size == Some(fit) {
            return;
        }

        let resampled = match &self.composite {
            Some(composite) => geometry::resample(composite, fit),
            None => geometry::resample(&source.image.to_rgba8(), fit),
        };
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [fit.0 as usize, fit.1 as usize],
            resampled.as_raw(),
        );
        self.display = Some(ctx.load_texture(
            "preview",
            color_image,
            egui::TextureOptions::LINEAR,
        ));
        self.display_size = Some(fit);
        self.display_dirty = false;
    }

    /// One-line summary for the status strip.
    fn status_line(&self) -> String {
        match &self.source {
            Some(source) => {
                let (w, h) = source.dimensions();
                match self.mode {
                    Some(mode) => format!("{} - {}x{} - {}", source.name, w, h, mode.label()),
                    None => format!("{} - {}x{}", source.name, w, h),
                }
            }
            None => "No image loaded".to_string(),
        }
    }
}

impl eframe::App for TilemarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Toolbar
        let action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, self.mode, &mut self.watermark_text)
            })
            .inner;

        match action {
            toolbar::ToolbarAction::Upload => self.upload(),
            toolbar::ToolbarAction::SelectMode(mode) => self.select_mode(mode),
            toolbar::ToolbarAction::Save => self.save(),
            toolbar::ToolbarAction::None => {}
        }

        // Status strip
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            canvas::show_status(ui, &self.status_line(), self.error.as_deref());
        });

        // Preview viewport
        egui::CentralPanel::default().show(ctx, |ui| {
            let viewport = ui.available_size();
            self.refresh_display(ctx, viewport);
            canvas::show(ui, &self.display);
        });
    }
}
