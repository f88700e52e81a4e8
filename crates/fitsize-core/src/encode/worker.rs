//! Offloads blocking encodes onto tokio's blocking thread pool.

use std::sync::Arc;

use async_trait::async_trait;

use super::{BlockingEncode, EncodeError, ImageEncoder};
use crate::params::EncodeParameters;
use crate::source::SourceImage;

/// Runs every encode on a worker thread via `tokio::task::spawn_blocking`.
///
/// The awaiting task stays free while the CPU-bound work runs. Calls are not
/// cancellable: dropping the future detaches the worker, which still runs to
/// completion.
#[derive(Debug)]
pub struct WorkerEncoder<E> {
    inner: Arc<E>,
}

impl<E: BlockingEncode> WorkerEncoder<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E> Clone for WorkerEncoder<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<E: BlockingEncode> ImageEncoder for WorkerEncoder<E> {
    async fn encode(
        &self,
        source: &SourceImage,
        params: &EncodeParameters,
    ) -> Result<Vec<u8>, EncodeError> {
        let inner = Arc::clone(&self.inner);
        let source = source.clone();
        let params = *params;

        tokio::task::spawn_blocking(move || inner.encode_blocking(&source, &params))
            .await
            .map_err(|e| EncodeError::Worker(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{EncoderConfig, RasterEncoder};
    use crate::params::CompressionBudget;
    use crate::source::MimeType;
    use crate::test_helpers::gradient_jpeg;

    struct Panicking;

    impl BlockingEncode for Panicking {
        fn encode_blocking(
            &self,
            _source: &SourceImage,
            _params: &EncodeParameters,
        ) -> Result<Vec<u8>, EncodeError> {
            panic!("codec blew up");
        }
    }

    struct ThreadName;

    impl BlockingEncode for ThreadName {
        fn encode_blocking(
            &self,
            _source: &SourceImage,
            _params: &EncodeParameters,
        ) -> Result<Vec<u8>, EncodeError> {
            let id = format!("{:?}", std::thread::current().id());
            Ok(id.into_bytes())
        }
    }

    fn source() -> SourceImage {
        SourceImage::with_type("photo.jpg", MimeType::Jpeg, gradient_jpeg(64, 48))
    }

    #[tokio::test]
    async fn test_worker_matches_inline_encode() {
        let params = EncodeParameters::initial(10_000, CompressionBudget::DEFAULT);
        let raster = RasterEncoder::new(EncoderConfig::single_pass());

        let inline = raster.encode_blocking(&source(), &params).unwrap();
        let offloaded = WorkerEncoder::new(raster).encode(&source(), &params).await.unwrap();

        assert_eq!(inline, offloaded);
    }

    #[tokio::test]
    async fn test_worker_runs_off_the_calling_thread() {
        let params = EncodeParameters::escalated(CompressionBudget::DEFAULT);
        let caller = format!("{:?}", std::thread::current().id());

        let worker = WorkerEncoder::new(ThreadName);
        let ran_on = worker.encode(&source(), &params).await.unwrap();

        assert_ne!(String::from_utf8(ran_on).unwrap(), caller);
    }

    #[tokio::test]
    async fn test_worker_panic_becomes_error() {
        let params = EncodeParameters::escalated(CompressionBudget::DEFAULT);
        let result = WorkerEncoder::new(Panicking).encode(&source(), &params).await;
        assert!(matches!(result, Err(EncodeError::Worker(_))));
    }
}
