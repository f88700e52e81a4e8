//! Target-size compression with one bounded escalation.
//!
//! [`Compressor::compress`] always encodes once with parameters picked from
//! the source size. If that output overshoots the budget it encodes exactly
//! once more with the fixed escalated parameters and returns that result,
//! whether or not it fits. Encoder failures are never retried.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::encode::{EncodeError, ImageEncoder};
use crate::params::{Attempt, CompressionBudget, EncodeParameters};
use crate::source::{MimeType, SourceImage};

/// User-facing message for a failed run.
pub const COMPRESSION_FAILED_MESSAGE: &str = "Error compressing image. Please try again.";

/// Errors from a compression run.
///
/// Overshooting the budget after the retry is not an error; check
/// [`CompressedImage::fits`] instead.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// The encoder failed on the given attempt.
    #[error("encoding failed on attempt {}: {source}", .attempt.number())]
    EncodingFailed {
        attempt: Attempt,
        #[source]
        source: EncodeError,
    },
}

/// The output of a compression run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    bytes: Vec<u8>,
    mime: MimeType,
    params: EncodeParameters,
    attempt: Attempt,
}

impl CompressedImage {
    pub fn new(bytes: Vec<u8>, mime: MimeType, params: EncodeParameters, attempt: Attempt) -> Self {
        Self {
            bytes,
            mime,
            params,
            attempt,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the encoder output in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Same as the source's type.
    pub fn mime(&self) -> MimeType {
        self.mime
    }

    /// Parameters of the attempt that produced this output.
    pub fn params(&self) -> &EncodeParameters {
        &self.params
    }

    pub fn attempt(&self) -> Attempt {
        self.attempt
    }

    /// Check if the output is within `budget`.
    pub fn fits(&self, budget: CompressionBudget) -> bool {
        budget.allows(self.size())
    }
}

/// Drives an [`ImageEncoder`] to meet a byte budget.
#[derive(Debug, Clone)]
pub struct Compressor<E> {
    encoder: E,
}

impl<E: ImageEncoder> Compressor<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Compress `source` toward `budget`.
    ///
    /// The two encoder calls are strictly sequential.
    ///
    /// # Errors
    ///
    /// Returns `CompressionError::EncodingFailed` as soon as either encoder
    /// call fails.
    pub async fn compress(
        &self,
        source: &SourceImage,
        budget: CompressionBudget,
    ) -> Result<CompressedImage, CompressionError> {
        let initial = EncodeParameters::initial(source.size(), budget);
        let first = self.attempt(source, initial, Attempt::Initial).await?;

        if first.fits(budget) {
            info!(
                file = source.name(),
                original = source.size(),
                compressed = first.size(),
                "compressed on first attempt"
            );
            return Ok(first);
        }

        debug!(
            size = first.size(),
            budget = budget.bytes(),
            "first attempt over budget, escalating"
        );

        let escalated = EncodeParameters::escalated(budget);
        let second = self.attempt(source, escalated, Attempt::Escalated).await?;

        if second.fits(budget) {
            info!(
                file = source.name(),
                original = source.size(),
                compressed = second.size(),
                "compressed on escalated attempt"
            );
        } else {
            warn!(
                file = source.name(),
                compressed = second.size(),
                budget = budget.bytes(),
                "escalated attempt still over budget"
            );
        }

        Ok(second)
    }

    async fn attempt(
        &self,
        source: &SourceImage,
        params: EncodeParameters,
        attempt: Attempt,
    ) -> Result<CompressedImage, CompressionError> {
        debug!(
            attempt = attempt.number(),
            quality = params.quality,
            max_dimension = params.max_dimension,
            "encoding"
        );

        let bytes = self
            .encoder
            .encode(source, &params)
            .await
            .map_err(|source| CompressionError::EncodingFailed { attempt, source })?;

        if bytes.is_empty() {
            return Err(CompressionError::EncodingFailed {
                attempt,
                source: EncodeError::EncodingFailed("encoder returned no data".to_string()),
            });
        }

        Ok(CompressedImage::new(bytes, source.mime(), params, attempt))
    }
}
