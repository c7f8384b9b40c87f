//! Collaborators the runtime relies on but doesn't implement itself.
//!
//! Image decoding, metadata extraction and directory enumeration are provided by the embedding
//! application. [`ImageCrateDecoder`] is a ready-made decoder backed by the `image` crate.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Decoded pixels in row-major order, `channels` bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

/// Decodes image files. Called from worker threads.
pub trait ImageDecoder: Send + Sync {
    /// Decodes the file at `path` into `channels` bytes per pixel (1 = luma, 2 = luma + alpha,
    /// 3 = RGB, 4 = RGBA).
    fn decode(&self, path: &Path, channels: u8) -> Result<DecodedImage>;
}

/// Decoder backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, path: &Path, channels: u8) -> Result<DecodedImage> {
        let image = image::open(path).map_err(|err| Error::Decode {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let (width, height) = (image.width(), image.height());
        let pixels = match channels {
            1 => image.into_luma8().into_raw(),
            2 => image.into_luma_alpha8().into_raw(),
            3 => image.into_rgb8().into_raw(),
            4 => image.into_rgba8().into_raw(),
            _ => {
                return Err(Error::Decode {
                    path: path.to_path_buf(),
                    reason: format!("unsupported channel count {}", channels),
                })
            }
        };

        Ok(DecodedImage {
            width,
            height,
            channels,
            pixels,
        })
    }
}

/// Display fields extracted from an image's metadata, already formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Camera make, e.g. `Canon`.
    pub make: Option<String>,
    /// Aperture, e.g. `f/2.8`.
    pub f_number: Option<String>,
    /// Exposure time, e.g. `1/250`.
    pub exposure_time: Option<String>,
    /// Sensitivity, e.g. `ISO 200`.
    pub iso: Option<String>,
}

impl ImageMetadata {
    /// Joins the available fields into a single overlay line; missing or blank fields are
    /// skipped.
    pub fn summary(&self) -> String {
        [&self.make, &self.f_number, &self.exposure_time, &self.iso]
            .iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join("   ")
    }

    pub fn is_empty(&self) -> bool {
        self.summary().is_empty()
    }
}

/// Reads metadata. Best effort: unreadable files yield empty metadata.
pub trait MetadataSource {
    fn metadata(&self, path: &Path) -> ImageMetadata;
}

/// An image file in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    /// File name, as shown to the user.
    pub name: String,
}

impl ImageEntry {
    /// Creates an entry named after the last path component.
    pub fn from_path(path: impl Into<PathBuf>) -> ImageEntry {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        ImageEntry { path, name }
    }
}

/// Lists the images in a directory, in display order.
pub trait FileEnumerator {
    fn enumerate(&self, dir: &Path) -> Result<Vec<ImageEntry>>;
}
