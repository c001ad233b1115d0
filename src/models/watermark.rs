// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Watermark settings.
//!
//! This module defines the two preset watermark colors and the
//! parameters captured from the UI at the moment of each preview or
//! save action.

/// Fixed translucency of the watermark text (0 = invisible, 255 = opaque).
pub const WATERMARK_ALPHA: u8 = 75;

/// The two preset watermark colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkMode {
    Light,
    Dark,
}

impl WatermarkMode {
    /// RGB fill color for this mode.
    pub fn color(self) -> [u8; 3] {
        match self {
            WatermarkMode::Light => [220, 220, 220],
            WatermarkMode::Dark => [68, 68, 68],
        }
    }

    /// Human-readable label for the mode toggle.
    pub fn label(self) -> &'static str {
        match self {
            WatermarkMode::Light => "Light Mark",
            WatermarkMode::Dark => "Dark Mark",
        }
    }
}

/// Everything the compositor needs for one render, captured from UI
/// state when the user previews or saves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkSpec {
    pub text: String,
    pub mode: WatermarkMode,
}

impl WatermarkSpec {
    pub fn new(text: impl Into<String>, mode: WatermarkMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }
}
