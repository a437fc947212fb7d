//! Image inspection and square thumbnail generation.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Crop** | `DynamicImage::crop_imm` around the centre |
//! | **Fit** | `DynamicImage::resize_exact`, `CatmullRom` up / `Lanczos3` down |
//! | **Encode** | `JpegEncoder::new_with_quality` |
//!
//! The crop is taken on the source before any scaling, so the largest
//! buffer allocated is the decoded upload or the output square.
//!
//! The dimension math is kept in pure functions so it can be tested without
//! pixels.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

/// Default thumbnail edge length in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 400;

/// Default JPEG quality for thumbnails.
pub const DEFAULT_THUMBNAIL_QUALITY: u8 = 75;

#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    #[error("Could not read image data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Unrecognised image format")]
    UnknownFormat,

    #[error("Image has zero width or height")]
    Empty,

    #[error("Could not encode thumbnail: {0}")]
    Encode(#[source] image::ImageError),
}

/// Thumbnail output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailConfig {
    /// Edge length of the square output.
    pub size: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
}

impl ThumbnailConfig {
    pub fn new(size: u32, quality: u8) -> Self {
        Self {
            size: size.max(1),
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THUMBNAIL_SIZE, DEFAULT_THUMBNAIL_QUALITY)
    }
}

/// Basic facts about an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

/// Square crop window inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Filter used to bring a `side`-pixel square to `size` pixels.
///
/// Small crops are enlarged with bicubic interpolation; larger ones are
/// reduced with Lanczos. `None` when no resize is needed.
pub fn fit_filter(side: u32, size: u32) -> Option<FilterType> {
    match side.cmp(&size) {
        std::cmp::Ordering::Less => Some(FilterType::CatmullRom),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(FilterType::Lanczos3),
    }
}

/// The centred square using the shorter edge as its side.
pub fn center_square(width: u32, height: u32) -> CropBox {
    if width == height {
        return CropBox {
            x: 0,
            y: 0,
            side: width,
        };
    }
    let side = width.min(height);
    CropBox {
        x: (width - side) / 2,
        y: (height - side) / 2,
        side,
    }
}

fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, ImagingError> {
    Ok(ImageReader::new(Cursor::new(bytes)).with_guessed_format()?)
}

/// Identify an image without decoding its pixels.
pub fn probe(bytes: &[u8]) -> Result<ImageInfo, ImagingError> {
    let reader = reader(bytes)?;
    let format = reader.format().ok_or(ImagingError::UnknownFormat)?;
    let (width, height) = reader.into_dimensions().map_err(ImagingError::Decode)?;
    if width == 0 || height == 0 {
        return Err(ImagingError::Empty);
    }
    Ok(ImageInfo {
        width,
        height,
        format,
    })
}

/// Produce a square JPEG thumbnail of exactly `config.size` pixels.
pub fn create_thumbnail(bytes: &[u8], config: &ThumbnailConfig) -> Result<Vec<u8>, ImagingError> {
    let reader = reader(bytes)?;
    if reader.format().is_none() {
        return Err(ImagingError::UnknownFormat);
    }
    let decoded = reader.decode().map_err(ImagingError::Decode)?;
    let thumb = square_thumbnail(decoded, config.size)?;

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, config.quality);
    thumb.write_with_encoder(encoder).map_err(ImagingError::Encode)?;
    Ok(out)
}

/// Pixel pipeline behind [`create_thumbnail`]: crop, RGB, fit.
pub fn square_thumbnail(image: DynamicImage, size: u32) -> Result<DynamicImage, ImagingError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ImagingError::Empty);
    }

    let crop = center_square(image.width(), image.height());
    let square = image.crop_imm(crop.x, crop.y, crop.side, crop.side);

    // Drop palette and alpha so the JPEG encoder sees plain RGB.
    let square = DynamicImage::ImageRgb8(square.to_rgb8());

    Ok(match fit_filter(crop.side, size) {
        Some(filter) => square.resize_exact(size, size, filter),
        None => square,
    })
}
