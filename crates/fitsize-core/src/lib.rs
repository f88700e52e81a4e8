//! fitsize Core - Target-size image compression
//!
//! This crate picks encoding parameters for a JPEG or PNG source, re-encodes
//! it, and escalates once to stricter parameters when the first result is
//! still over the byte budget.
//!
//! # Module Structure
//!
//! - `params` - Size-to-quality heuristic, budget, per-attempt parameters
//! - `compress` - The orchestrator ([`Compressor`])
//! - `encode` - Encoder trait plus the `image`-based implementation
//! - `decode` - Decoding with EXIF orientation, fit-to-edge resizing
//! - `source` - Input model and type validation
//! - `output` - Download names, readable sizes, data URLs
//! - `session` - UI session state machine
//!
//! # Examples
//!
//! ```ignore
//! use fitsize_core::{CompressionBudget, Compressor, RasterEncoder, SourceImage, WorkerEncoder};
//!
//! let source = SourceImage::open("holiday.jpg").await?;
//! let compressor = Compressor::new(WorkerEncoder::new(RasterEncoder::default()));
//! let result = compressor.compress(&source, CompressionBudget::DEFAULT).await?;
//! println!("{} -> {} bytes", source.size(), result.size());
//! ```

pub mod compress;
pub mod decode;
pub mod encode;
pub mod output;
pub mod params;
pub mod session;
pub mod source;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use compress::{CompressedImage, CompressionError, Compressor, COMPRESSION_FAILED_MESSAGE};
pub use encode::{BlockingEncode, EncodeError, EncoderConfig, ImageEncoder, RasterEncoder};
#[cfg(feature = "tokio")]
pub use encode::WorkerEncoder;
pub use output::{compressed_file_name, compression_ratio, data_url, format_file_size};
pub use params::{initial_quality, Attempt, CompressionBudget, EncodeParameters};
pub use session::{Phase, Session, SessionError, SessionState};
pub use source::{MimeType, SourceError, SourceImage, ValidationError, UNSUPPORTED_TYPE_MESSAGE};

#[cfg(all(test, feature = "tokio"))]
mod tests {
    use super::*;
    use crate::test_helpers::noisy_jpeg;

    /// Full pipeline on real pixels: worker-offloaded raster encoder behind
    /// the orchestrator.
    #[tokio::test]
    async fn test_end_to_end_with_raster_encoder() {
        let source = SourceImage::new("noise.jpg", "image/jpeg", noisy_jpeg(2100, 700, 95)).unwrap();
        let compressor = Compressor::new(WorkerEncoder::new(RasterEncoder::default()));

        let result = compressor
            .compress(&source, CompressionBudget::DEFAULT)
            .await
            .unwrap();

        assert_eq!(result.mime(), MimeType::Jpeg);
        assert!(result.size() > 0);
        assert!(result.size() < source.size());

        let decoded = image::load_from_memory(result.bytes()).unwrap();
        let limit = result.params().max_dimension;
        assert!(decoded.width() <= limit && decoded.height() <= limit);
    }

    #[tokio::test]
    async fn test_end_to_end_corrupt_source_fails() {
        let source = SourceImage::new("broken.png", "image/png", vec![0u8; 64]).unwrap();
        let compressor = Compressor::new(WorkerEncoder::new(RasterEncoder::default()));

        let err = compressor
            .compress(&source, CompressionBudget::DEFAULT)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CompressionError::EncodingFailed {
                attempt: Attempt::Initial,
                source: EncodeError::Decode(_),
            }
        ));
    }
}
