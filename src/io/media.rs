// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image loading and saving.
//!
//! Loading handles plain raster files plus one container special case:
//! a `.tar` archive whose image entry is named after the archive itself
//! (base name with the `.tar` stripped). Saving goes through an
//! explicit, validated [`SaveFormat`] rather than trusting the path
//! suffix blindly.

use crate::models::image::SourceImage;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors surfaced by image loading and saving.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("archive {archive} has no entry named '{entry}'")]
    ArchiveEntryNotFound { archive: String, entry: String },

    #[error("unsupported save format '{0}'")]
    UnsupportedSaveFormat(String),
}

/// Output formats offered in the save dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
}

impl SaveFormat {
    pub const ALL: [SaveFormat; 5] = [
        SaveFormat::Jpeg,
        SaveFormat::Png,
        SaveFormat::Gif,
        SaveFormat::Bmp,
        SaveFormat::Tiff,
    ];

    /// Map a file extension to a save format, if supported.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "png" => Some(SaveFormat::Png),
            "gif" => Some(SaveFormat::Gif),
            "bmp" => Some(SaveFormat::Bmp),
            "tif" | "tiff" => Some(SaveFormat::Tiff),
            _ => None,
        }
    }

    /// Dialog filter label for this format.
    pub fn label(self) -> &'static str {
        match self {
            SaveFormat::Jpeg => "JPEG files",
            SaveFormat::Png => "PNG files",
            SaveFormat::Gif => "GIF files",
            SaveFormat::Bmp => "BMP files",
            SaveFormat::Tiff => "TIFF files",
        }
    }

    /// File extensions associated with this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            SaveFormat::Jpeg => &["jpg", "jpeg"],
            SaveFormat::Png => &["png"],
            SaveFormat::Gif => &["gif"],
            SaveFormat::Bmp => &["bmp"],
            SaveFormat::Tiff => &["tiff", "tif"],
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            SaveFormat::Jpeg => ImageFormat::Jpeg,
            SaveFormat::Png => ImageFormat::Png,
            SaveFormat::Gif => ImageFormat::Gif,
            SaveFormat::Bmp => ImageFormat::Bmp,
            SaveFormat::Tiff => ImageFormat::Tiff,
        }
    }
}

/// Extensions accepted by the open dialog.
pub const OPEN_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "tar"];

/// Save formats in dialog order, with the format matching the
/// originally loaded extension listed first so it becomes the default.
pub fn dialog_formats(default_extension: &str) -> Vec<SaveFormat> {
    let mut formats = SaveFormat::ALL.to_vec();
    if let Some(preferred) = SaveFormat::from_extension(default_extension) {
        formats.sort_by_key(|f| *f != preferred);
    }
    formats
}

/// Append the default extension when the user picked a path without one.
pub fn apply_default_extension(mut path: std::path::PathBuf, extension: &str) -> std::path::PathBuf {
    if path.extension().is_none() {
        path.set_extension(extension);
    }
    path
}

/// Load an image from the given path.
///
/// `.tar` archives are special-cased: the image entry is looked up by
/// the archive's base name with the extension stripped. Any failure
/// leaves the caller's previously loaded image untouched.
pub fn load_image(path: &Path) -> Result<SourceImage, MediaError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if extension.as_deref() == Some("tar") {
        let image = load_from_tar(path)?;
        // The inner entry carries no usable extension; default the save
        // format to PNG.
        return Ok(SourceImage::new(image, name, "png".to_string()));
    }

    let image = image::open(path)?;
    let extension = extension.unwrap_or_else(|| "png".to_string());
    Ok(SourceImage::new(image, name, extension))
}

/// Decode the image entry of a `.tar` archive.
///
/// The entry is expected to be named after the archive itself, e.g.
/// `photo.tar` must contain an entry named `photo`. This mirrors the
/// container convention the app has always used; arbitrary inner names
/// are deliberately not supported.
fn load_from_tar(path: &Path) -> Result<DynamicImage, MediaError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = File::open(path)?;
    let mut archive = tar::Archive::new(file);
    for entry in archive.entries()? {
        let mut entry = entry?;
        let matches = entry
            .path()?
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n == stem);
        if matches {
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;
            return Ok(image::load_from_memory(&data)?);
        }
    }

    Err(MediaError::ArchiveEntryNotFound {
        archive: path.display().to_string(),
        entry: stem,
    })
}

/// Encode and write a composited image to the given path.
///
/// The format is chosen from the path's extension via [`SaveFormat`];
/// an unknown or missing extension is rejected before anything is
/// written. JPEG has no alpha channel, so the image is flattened to
/// RGB first.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<(), MediaError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| MediaError::UnsupportedSaveFormat(String::new()))?;
    let format = SaveFormat::from_extension(extension)
        .ok_or_else(|| MediaError::UnsupportedSaveFormat(extension.to_string()))?;

    match format {
        SaveFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
            rgb.save_with_format(path, format.image_format())?;
        }
        _ => image.save_with_format(path, format.image_format())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::io::Cursor;

    fn sample_image(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([120, 30, 200, 255]))
    }

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn write_tar(path: &Path, entry_name: &str, data: &[u8]) {
        let mut builder = tar::Builder::new(Vec::new());
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, entry_name, data).unwrap();
        std::fs::write(path, builder.into_inner().unwrap()).unwrap();
    }

    #[test]
    fn test_dialog_formats_put_original_extension_first() {
        assert_eq!(dialog_formats("gif")[0], SaveFormat::Gif);
        assert_eq!(dialog_formats("jpeg")[0], SaveFormat::Jpeg);
        // Unknown extension keeps the canonical order
        assert_eq!(dialog_formats("xyz"), SaveFormat::ALL.to_vec());
        assert_eq!(dialog_formats("png").len(), SaveFormat::ALL.len());
    }

    #[test]
    fn test_apply_default_extension() {
        use std::path::PathBuf;
        assert_eq!(
            apply_default_extension(PathBuf::from("/tmp/out"), "jpg"),
            PathBuf::from("/tmp/out.jpg")
        );
        // An explicit extension wins over the default
        assert_eq!(
            apply_default_extension(PathBuf::from("/tmp/out.png"), "jpg"),
            PathBuf::from("/tmp/out.png")
        );
    }

    #[test]
    fn test_save_format_from_extension() {
        assert_eq!(SaveFormat::from_extension("jpg"), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_extension("JPEG"), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_extension("png"), Some(SaveFormat::Png));
        assert_eq!(SaveFormat::from_extension("tif"), Some(SaveFormat::Tiff));
        assert_eq!(SaveFormat::from_extension("webp"), None);
        assert_eq!(SaveFormat::from_extension(""), None);
    }

    #[test]
    fn test_load_plain_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        sample_image(4, 3).save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.extension, "png");
        assert_eq!(loaded.name, "sample.png");
    }

    #[test]
    fn test_load_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        assert!(matches!(load_image(&path), Err(MediaError::Decode(_))));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.png");
        assert!(load_image(&path).is_err());
    }

    #[test]
    fn test_load_tar_with_matching_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.tar");
        write_tar(&path, "photo", &png_bytes(&sample_image(5, 7)));

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (5, 7));
        assert_eq!(loaded.extension, "png");
    }

    #[test]
    fn test_load_tar_with_mismatched_entry_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.tar");
        write_tar(&path, "other", &png_bytes(&sample_image(5, 7)));

        assert!(matches!(
            load_image(&path),
            Err(MediaError::ArchiveEntryNotFound { .. })
        ));
    }

    #[test]
    fn test_load_tar_with_corrupt_entry_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.tar");
        write_tar(&path, "photo", b"garbage bytes");

        assert!(matches!(load_image(&path), Err(MediaError::Decode(_))));
    }

    #[test]
    fn test_save_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let original = sample_image(6, 4);

        save_image(&original, &path).unwrap();
        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.as_raw(), original.as_raw());
    }

    #[test]
    fn test_save_jpeg_flattens_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");

        save_image(&sample_image(6, 4), &path).unwrap();
        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (6, 4));
    }

    #[test]
    fn test_save_unsupported_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.webp");

        assert!(matches!(
            save_image(&sample_image(2, 2), &path),
            Err(MediaError::UnsupportedSaveFormat(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_without_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");

        assert!(matches!(
            save_image(&sample_image(2, 2), &path),
            Err(MediaError::UnsupportedSaveFormat(_))
        ));
    }
}
