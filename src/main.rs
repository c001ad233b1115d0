// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tilemark
//!
//! A cross-platform desktop application for overlaying tiled,
//! translucent text watermarks on images.

mod app;
mod io;
mod models;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::TilemarkApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 660.0])
            .with_min_inner_size([700.0, 500.0])
            .with_title("Tilemark"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Tilemark",
        options,
        Box::new(|_cc| Ok(Box::new(TilemarkApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
