// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar UI: upload, watermark mode toggles, text entry and save.
//!
//! The toolbar only reports what the user clicked; the app decides
//! whether the action applies (e.g. mode selection with no image
//! loaded is ignored there).

use crate::models::watermark::WatermarkMode;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    Upload,
    SelectMode(WatermarkMode),
    Save,
}

/// Display the toolbar row.
pub fn show(
    ui: &mut egui::Ui,
    current_mode: Option<WatermarkMode>,
    watermark_text: &mut String,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("Upload Picture").clicked() {
            action = ToolbarAction::Upload;
        }

        ui.separator();

        for mode in [WatermarkMode::Light, WatermarkMode::Dark] {
            if ui
                .radio(current_mode == Some(mode), mode.label())
                .clicked()
            {
                action = ToolbarAction::SelectMode(mode);
            }
        }

        ui.separator();

        ui.add(
            egui::TextEdit::singleline(watermark_text)
                .desired_width(220.0)
                .hint_text("Watermark text"),
        );

        ui.separator();

        if ui.button("Save").clicked() {
            action = ToolbarAction::Save;
        }
    });

    action
}
