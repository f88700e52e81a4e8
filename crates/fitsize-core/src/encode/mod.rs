//! Image encoding capability.
//!
//! The orchestrator only knows the [`ImageEncoder`] trait: give it a source
//! and an [`EncodeParameters`] set, get back the encoded bytes.
//!
//! Implementations:
//! - [`RasterEncoder`] - lossy re-encode and downscale using the `image` crate.
//!   Runs inline on the calling task, which is what the WASM bindings want
//!   since they already live in a Web Worker.
//! - [`WorkerEncoder`] - wraps any [`BlockingEncode`] and moves each call onto
//!   tokio's blocking pool so an async caller is never stalled by CPU work.

mod config;
mod formats;
mod raster;
#[cfg(feature = "tokio")]
mod worker;

use async_trait::async_trait;
use thiserror::Error;

use crate::decode::DecodeError;
use crate::params::EncodeParameters;
use crate::source::SourceImage;

pub use config::EncoderConfig;
pub use formats::{encode_jpeg, encode_png};
pub use raster::RasterEncoder;
#[cfg(feature = "tokio")]
pub use worker::WorkerEncoder;

/// Errors that can occur while encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The source has no bytes.
    #[error("Source image is empty")]
    EmptyInput,

    /// The source could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying codec failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The worker running the encode panicked or was cancelled.
    #[error("Encoder worker failed: {0}")]
    Worker(String),
}

/// Produces encoded bytes for a source under the given parameters.
///
/// Implementations should aim for `params.target_budget` but are not required
/// to reach it; the orchestrator checks the result size itself.
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    async fn encode(
        &self,
        source: &SourceImage,
        params: &EncodeParameters,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Synchronous, CPU-bound encoding.
pub trait BlockingEncode: Send + Sync + 'static {
    fn encode_blocking(
        &self,
        source: &SourceImage,
        params: &EncodeParameters,
    ) -> Result<Vec<u8>, EncodeError>;
}
