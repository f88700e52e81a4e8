//! Image decoding and resizing for the raster encoder.
//!
//! This module provides functionality for:
//! - Decoding JPEG images with EXIF orientation correction
//! - Decoding PNG images (alpha preserved)
//! - Downscaling to fit a maximum edge length
//!
//! All operations are synchronous. Callers that must not block run them
//! through [`crate::encode::WorkerEncoder`] or inside a Web Worker.

mod orientation;
mod resize;

use std::io::Cursor;

use image::{DynamicImage, ImageReader};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::MimeType;

pub use orientation::{get_orientation, Orientation};
pub use resize::{fit_dimensions, resize_to_fit};

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Decode `bytes` as the given format.
///
/// JPEG input has its EXIF orientation applied so the output is upright;
/// the re-encoded file carries no EXIF block.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes cannot be decoded as
/// the declared format.
pub fn decode(bytes: &[u8], mime: MimeType) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(mime.image_format());

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    match mime {
        MimeType::Jpeg => Ok(get_orientation(bytes).apply(img)),
        MimeType::Png => Ok(img),
    }
}
