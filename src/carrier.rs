//! Carrier image I/O: decoding any raster into a pixel grid and writing the
//! result back in a lossless container.
//!
//! Lossy recompression rewrites low-order bits, which destroys the hidden
//! frame, so only PNG, BMP and TIFF are accepted as output.

use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use crate::sequencer::ChannelCoord;
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage, RgbaImage};
use std::path::Path;
use tracing::debug;

/// Lossless containers the stego image may be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Bmp,
    Tiff,
}

impl OutputFormat {
    /// Pick the output format from a file extension.
    ///
    /// Lossy, unknown and missing extensions are rejected.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = match path.extension() {
            Some(ext) => ext.to_string_lossy().to_lowercase(),
            None => {
                return Err(StegoError::UnsupportedOutputFormat(format!(
                    "'{}' has no file extension",
                    path.display()
                )))
            }
        };
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "tif" | "tiff" => Ok(Self::Tiff),
            "jpg" | "jpeg" | "webp" | "avif" | "gif" => Err(StegoError::UnsupportedOutputFormat(
                format!(".{} is lossy and would destroy the hidden data", ext),
            )),
            _ => Err(StegoError::UnsupportedOutputFormat(format!(
                ".{} is not a known lossless format",
                ext
            ))),
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

/// A decoded carrier narrowed to 8-bit channels.
///
/// Images with transparency keep their alpha plane; it is carried along but
/// never used for embedding.
#[derive(Debug, Clone, PartialEq)]
pub enum Carrier {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Carrier {
    /// Decode an image file, guessing the format from its content.
    pub fn open(path: &Path) -> Result<Self> {
        let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        debug!(path = %path.display(), color = ?img.color(), "carrier decoded");
        Ok(Self::from_dynamic(&img))
    }

    pub fn from_dynamic(img: &DynamicImage) -> Self {
        if img.color().has_alpha() {
            Self::Rgba(img.to_rgba8())
        } else {
            Self::Rgb(img.to_rgb8())
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Self::Rgb(img) => DynamicImage::ImageRgb8(img),
            Self::Rgba(img) => DynamicImage::ImageRgba8(img),
        }
    }

    /// Write the carrier in the given lossless format.
    pub fn save(&self, path: &Path, format: OutputFormat) -> Result<()> {
        match self {
            Self::Rgb(img) => img.save_with_format(path, format.image_format())?,
            Self::Rgba(img) => img.save_with_format(path, format.image_format())?,
        }
        Ok(())
    }
}

impl PixelGrid for Carrier {
    fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Rgb(img) => img.dimensions(),
            Self::Rgba(img) => img.dimensions(),
        }
    }

    fn channel(&self, coord: ChannelCoord) -> u8 {
        match self {
            Self::Rgb(img) => img.channel(coord),
            Self::Rgba(img) => img.channel(coord),
        }
    }

    fn set_channel(&mut self, coord: ChannelCoord, value: u8) {
        match self {
            Self::Rgb(img) => img.set_channel(coord, value),
            Self::Rgba(img) => img.set_channel(coord, value),
        }
    }
}
