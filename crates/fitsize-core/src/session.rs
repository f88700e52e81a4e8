//! Session state for an interactive front end.
//!
//! One [`Session`] holds everything a compressor UI shows: the selected
//! source, the current (or last good) result, and a user-facing notice. All
//! changes go through explicit transitions:
//!
//! ```text
//! Idle ──select──▶ Selected ──begin──▶ Compressing ──finish──▶ Succeeded
//!                     ▲                     ▲        └─────────▶ Failed
//!                     └──select (any state but Compressing)      │
//!                                           └──begin─────────────┘
//! ```
//!
//! `Compressing` is the busy flag: while set, `begin` and `select` are
//! refused rather than queued.

use std::sync::Arc;

use thiserror::Error;

use crate::compress::{
    CompressedImage, CompressionError, Compressor, COMPRESSION_FAILED_MESSAGE,
};
use crate::encode::ImageEncoder;
use crate::output::{compressed_file_name, compression_ratio, data_url};
use crate::params::CompressionBudget;
use crate::source::{SourceImage, ValidationError};

/// Errors from session transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a compression run is already in progress")]
    Busy,

    #[error("no image selected")]
    NothingSelected,

    #[error("no compression run in progress")]
    NotCompressing,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Compression(Arc<CompressionError>),
}

/// Coarse phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selected,
    Compressing,
    Succeeded,
    Failed,
}

/// The full session state.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Selected {
        source: SourceImage,
    },
    Compressing {
        source: SourceImage,
        previous: Option<CompressedImage>,
    },
    Succeeded {
        source: SourceImage,
        result: CompressedImage,
    },
    Failed {
        source: SourceImage,
        previous: Option<CompressedImage>,
        error: Arc<CompressionError>,
    },
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle => Phase::Idle,
            SessionState::Selected { .. } => Phase::Selected,
            SessionState::Compressing { .. } => Phase::Compressing,
            SessionState::Succeeded { .. } => Phase::Succeeded,
            SessionState::Failed { .. } => Phase::Failed,
        }
    }
}

/// A single user session with one selected image at a time.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    notice: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_compressing(&self) -> bool {
        self.phase() == Phase::Compressing
    }

    /// A compress action is offered when an image is selected and no run is
    /// in flight.
    pub fn can_compress(&self) -> bool {
        !matches!(self.phase(), Phase::Idle | Phase::Compressing)
    }

    /// Message to show the user, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn source(&self) -> Option<&SourceImage> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Selected { source }
            | SessionState::Compressing { source, .. }
            | SessionState::Succeeded { source, .. }
            | SessionState::Failed { source, .. } => Some(source),
        }
    }

    /// The result to display: the current one, or the last good one kept
    /// across a running or failed re-run.
    pub fn compressed(&self) -> Option<&CompressedImage> {
        match &self.state {
            SessionState::Succeeded { result, .. } => Some(result),
            SessionState::Compressing { previous, .. } | SessionState::Failed { previous, .. } => {
                previous.as_ref()
            }
            _ => None,
        }
    }

    /// The error of the last run, when it failed.
    pub fn last_error(&self) -> Option<&CompressionError> {
        match &self.state {
            SessionState::Failed { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }

    /// Validate and select a new file. Clears any previous result.
    ///
    /// On a rejected type the notice is set and the current state is kept.
    pub fn select(
        &mut self,
        name: impl Into<String>,
        mime: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<(), SessionError> {
        if self.is_compressing() {
            return Err(SessionError::Busy);
        }

        match SourceImage::new(name, mime, bytes) {
            Ok(source) => self.select_source(source),
            Err(err) => {
                self.notice = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Select an already validated source.
    pub fn select_source(&mut self, source: SourceImage) -> Result<(), SessionError> {
        if self.is_compressing() {
            return Err(SessionError::Busy);
        }
        tracing::debug!(file = source.name(), size = source.size(), "selected");
        self.notice = None;
        self.state = SessionState::Selected { source };
        Ok(())
    }

    /// Enter `Compressing` and hand back the source to compress.
    pub fn begin(&mut self) -> Result<SourceImage, SessionError> {
        let (source, previous) = match std::mem::take(&mut self.state) {
            SessionState::Idle => return Err(SessionError::NothingSelected),
            state @ SessionState::Compressing { .. } => {
                self.state = state;
                return Err(SessionError::Busy);
            }
            SessionState::Selected { source } => (source, None),
            SessionState::Succeeded { source, result } => (source, Some(result)),
            SessionState::Failed {
                source, previous, ..
            } => (source, previous),
        };

        self.notice = None;
        self.state = SessionState::Compressing {
            source: source.clone(),
            previous,
        };
        Ok(source)
    }

    /// Record the outcome of the run started by [`Session::begin`].
    ///
    /// A failure keeps the previous good result and sets the generic notice.
    pub fn finish(
        &mut self,
        outcome: Result<CompressedImage, CompressionError>,
    ) -> Result<(), SessionError> {
        let (source, previous) = match std::mem::take(&mut self.state) {
            SessionState::Compressing { source, previous } => (source, previous),
            other => {
                self.state = other;
                return Err(SessionError::NotCompressing);
            }
        };

        self.state = match outcome {
            Ok(result) => SessionState::Succeeded { source, result },
            Err(error) => {
                tracing::error!(file = source.name(), %error, "compression failed");
                self.notice = Some(COMPRESSION_FAILED_MESSAGE.to_string());
                SessionState::Failed {
                    source,
                    previous,
                    error: Arc::new(error),
                }
            }
        };
        Ok(())
    }

    /// Run a full compression of the selected source.
    pub async fn compress_with<E: ImageEncoder>(
        &mut self,
        compressor: &Compressor<E>,
        budget: CompressionBudget,
    ) -> Result<&CompressedImage, SessionError> {
        let source = self.begin()?;
        let outcome = compressor.compress(&source, budget).await;
        self.finish(outcome)?;

        match &self.state {
            SessionState::Succeeded { result, .. } => Ok(result),
            SessionState::Failed { error, .. } => Err(SessionError::Compression(Arc::clone(error))),
            _ => Err(SessionError::NotCompressing),
        }
    }

    /// Percentage saved by the displayed result.
    pub fn compression_ratio(&self) -> Option<i64> {
        let source = self.source()?;
        let result = self.compressed()?;
        Some(compression_ratio(source.size(), result.size()))
    }

    /// Download name for the displayed result.
    pub fn download_name(&self) -> Option<String> {
        self.compressed()?;
        self.source().map(|s| compressed_file_name(s.name()))
    }

    pub fn original_preview(&self) -> Option<String> {
        self.source().map(|s| data_url(s.mime(), s.bytes()))
    }

    pub fn compressed_preview(&self) -> Option<String> {
        self.compressed().map(|c| data_url(c.mime(), c.bytes()))
    }
}
