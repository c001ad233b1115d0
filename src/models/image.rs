// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The loaded source image.
//!
//! This module defines the in-memory representation of the currently
//! loaded picture. The decoded bitmap is never mutated in place; every
//! transformation (watermarking, resampling) produces a new buffer.

use image::{DynamicImage, GenericImageView};

/// A decoded image together with the metadata needed for saving.
pub struct SourceImage {
    /// The decoded bitmap, untouched for the lifetime of the load.
    pub image: DynamicImage,
    /// Display name of the file this image was loaded from.
    pub name: String,
    /// Lowercased extension of the originally loaded file, used as the
    /// default save format. Images pulled out of a tar container carry
    /// no usable extension and default to `png`.
    pub extension: String,
}

impl SourceImage {
    /// Create a source image from a decoded bitmap and file metadata.
    pub fn new(image: DynamicImage, name: String, extension: String) -> Self {
        Self {
            image,
            name,
            extension,
        }
    }

    /// Width and height of the decoded bitmap in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}
