//! Lossy re-encode and downscale using the `image` crate.

use async_trait::async_trait;
use image::DynamicImage;
use tracing::debug;

use super::config::EncoderConfig;
use super::formats::{encode_jpeg, encode_png};
use super::{BlockingEncode, EncodeError, ImageEncoder};
use crate::decode::{decode, fit_dimensions, resize_to_fit, FilterType};
use crate::params::EncodeParameters;
use crate::source::{MimeType, SourceImage};

/// Re-encodes a source to its own format, downscaled to the parameter's max
/// dimension, then keeps tightening until the output fits the target budget
/// or the pass limit is reached.
///
/// Each pass either lowers JPEG quality by `quality_step` or, once quality is
/// at its floor (and always for PNG), shrinks both edges by `scale_step`. The
/// smallest output seen is returned, so the result is best-effort: it may
/// still exceed the target.
#[derive(Debug, Clone, Default)]
pub struct RasterEncoder {
    config: EncoderConfig,
}

impl RasterEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn encode_source(
        &self,
        source: &SourceImage,
        params: &EncodeParameters,
    ) -> Result<Vec<u8>, EncodeError> {
        if source.is_empty() {
            return Err(EncodeError::EmptyInput);
        }

        let config = self.config.sanitized();
        let mime = source.mime();

        let decoded = decode(source.bytes(), mime)?;
        let within_limit = params.max_dimension == 0
            || (decoded.width() <= params.max_dimension && decoded.height() <= params.max_dimension);

        let mut image = resize_to_fit(decoded, params.max_dimension, config.filter);
        let mut quality = params.quality.clamp(config.min_quality, 1.0);

        let mut best = encode_pass(&image, mime, quality)?;
        debug!(
            pass = 1,
            quality,
            width = image.width(),
            height = image.height(),
            size = best.len(),
            "encoded"
        );

        for pass in 2..=config.max_iterations {
            if best.len() as u64 <= params.target_budget {
                break;
            }

            let next_quality = (quality - config.quality_step).max(config.min_quality);
            if mime == MimeType::Jpeg && next_quality < quality {
                quality = next_quality;
            } else {
                match shrink(&image, config.scale_step, config.filter) {
                    Some(smaller) => image = smaller,
                    None => break,
                }
            }

            let bytes = encode_pass(&image, mime, quality)?;
            debug!(
                pass,
                quality,
                width = image.width(),
                height = image.height(),
                size = bytes.len(),
                "encoded"
            );
            if bytes.len() < best.len() {
                best = bytes;
            }
        }

        if config.keep_smaller_original && within_limit && source.size() < best.len() as u64 {
            debug!(
                size = source.size(),
                "original is smaller than every re-encode, keeping it"
            );
            return Ok(source.bytes().to_vec());
        }

        Ok(best)
    }
}

fn encode_pass(image: &DynamicImage, mime: MimeType, quality: f32) -> Result<Vec<u8>, EncodeError> {
    match mime {
        MimeType::Jpeg => encode_jpeg(image, (quality * 100.0).round() as u8),
        MimeType::Png => encode_png(image, quality),
    }
}

/// Scale both edges by `factor`; `None` when the image can't get any smaller.
fn shrink(image: &DynamicImage, factor: f32, filter: FilterType) -> Option<DynamicImage> {
    let (width, height) = (image.width(), image.height());
    let longest = width.max(height);
    let target = ((longest as f32) * factor).floor() as u32;
    if target == 0 || target >= longest {
        return None;
    }

    let (new_width, new_height) = fit_dimensions(width, height, target);
    Some(image.resize_exact(new_width, new_height, filter.to_image_filter()))
}

impl BlockingEncode for RasterEncoder {
    fn encode_blocking(
        &self,
        source: &SourceImage,
        params: &EncodeParameters,
    ) -> Result<Vec<u8>, EncodeError> {
        self.encode_source(source, params)
    }
}

/// Inline encoding: the work runs on the polling task. Use
/// [`super::WorkerEncoder`] to offload it on native targets.
#[async_trait]
impl ImageEncoder for RasterEncoder {
    async fn encode(
        &self,
        source: &SourceImage,
        params: &EncodeParameters,
    ) -> Result<Vec<u8>, EncodeError> {
        self.encode_source(source, params)
    }
}
