// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Display surface for the preview.
//!
//! This module draws the current display texture centered in the
//! viewport, or a placeholder message when no image is loaded. The
//! texture is already resampled to the aspect-fit size, so it is drawn
//! at its native pixel size.

/// Display the preview area.
pub fn show(ui: &mut egui::Ui, texture: &Option<egui::TextureHandle>) {
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available = ui.available_size();
    ui.set_min_size(available);

    if let Some(texture) = texture {
        let size = texture.size_vec2();
        let x_offset = ((available.x - size.x) / 2.0).max(0.0);
        let y_offset = ((available.y - size.y) / 2.0).max(0.0);

        let image_rect = egui::Rect::from_min_size(
            ui.min_rect().min + egui::vec2(x_offset, y_offset),
            size,
        );

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    } else {
        // Placeholder shown only while no image is loaded
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(
                    egui::RichText::new("Image will appear here")
                        .size(24.0)
                        .color(egui::Color32::from_gray(200)),
                );
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new("Upload a picture to begin")
                        .weak()
                        .color(egui::Color32::from_gray(150)),
                );
            });
        });
    }
}

/// Display the status strip under the preview area.
pub fn show_status(ui: &mut egui::Ui, info: &str, error: Option<&str>) {
    ui.horizontal(|ui| {
        ui.label(info);
        if let Some(error) = error {
            ui.separator();
            ui.colored_label(egui::Color32::LIGHT_RED, error);
        }
    });
}
