//! Single-pass JPEG and PNG encoding.
//!
//! JPEG uses the `image` crate's baseline encoder with a 1-100 quality.
//! PNG is lossless; the quality factor only picks how hard deflate works.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, PngEncoder};
use image::{DynamicImage, ImageEncoder};

use super::EncodeError;

/// Encode an image to JPEG bytes.
///
/// Alpha is dropped, since JPEG has no transparency.
///
/// # Quality Guidelines
///
/// * 80-100: Good quality, larger files
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let rgb = image.to_rgb8();
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));

    encoder
        .write_image(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode an image to PNG bytes.
///
/// Lower quality factors spend more CPU on deflate for a smaller file; the
/// pixels are never altered.
pub fn encode_png(image: &DynamicImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let compression = if quality <= 0.7 {
        CompressionType::Best
    } else {
        CompressionType::Default
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new_with_quality(
        &mut buffer,
        compression,
        image::codecs::png::FilterType::Adaptive,
    );

    let color = image.color().into();
    encoder
        .write_image(image.as_bytes(), width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
