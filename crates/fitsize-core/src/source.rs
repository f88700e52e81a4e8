//! Source image model and input validation.
//!
//! Only JPEG and PNG files are accepted. Anything else is rejected here with a
//! [`ValidationError`] before any encoder work is scheduled.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-facing message for a rejected selection.
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Please select a JPEG or PNG image.";

/// Errors raised while validating a user selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The MIME type (or extension) is not JPEG or PNG.
    #[error("Please select a JPEG or PNG image.")]
    UnsupportedType { mime: String },
}

/// Errors raised while reading a source from disk.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Image formats accepted as input. The output keeps the same format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MimeType {
    Jpeg,
    Png,
}

impl MimeType {
    /// Parse a MIME type string such as `image/jpeg` or `image/png; charset=binary`.
    pub fn from_mime(mime: &str) -> Result<Self, ValidationError> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(MimeType::Jpeg),
            "image/png" => Ok(MimeType::Png),
            _ => Err(ValidationError::UnsupportedType {
                mime: mime.to_string(),
            }),
        }
    }

    /// Infer the type from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Result<Self, ValidationError> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(MimeType::Jpeg),
            "png" => Ok(MimeType::Png),
            _ => Err(ValidationError::UnsupportedType {
                mime: format!(".{ext}"),
            }),
        }
    }

    /// Canonical MIME string.
    pub fn as_str(self) -> &'static str {
        match self {
            MimeType::Jpeg => "image/jpeg",
            MimeType::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            MimeType::Jpeg => "jpg",
            MimeType::Png => "png",
        }
    }

    /// The matching `image` crate format.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            MimeType::Jpeg => image::ImageFormat::Jpeg,
            MimeType::Png => image::ImageFormat::Png,
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-selected input image.
///
/// The bytes are shared, so cloning a `SourceImage` to hand it to a worker
/// thread does not copy the file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    name: String,
    mime: MimeType,
    bytes: Arc<[u8]>,
}

impl SourceImage {
    /// Validate a selection and build a source from it.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnsupportedType` for anything other than
    /// `image/jpeg` or `image/png`.
    pub fn new(
        name: impl Into<String>,
        mime: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self, ValidationError> {
        let mime = MimeType::from_mime(mime)?;
        Ok(Self::with_type(name, mime, bytes))
    }

    /// Build a source whose type is already known.
    pub fn with_type(name: impl Into<String>, mime: MimeType, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime,
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, inferring its type from the extension.
    #[cfg(feature = "tokio")]
    pub async fn open(path: impl AsRef<std::path::Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime = MimeType::from_extension(ext)?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SourceError::Io(format!("{}: {}", path.display(), e)))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(file = %name, size = bytes.len(), "read source image");
        Ok(Self::with_type(name, mime, bytes))
    }

    /// Display name of the selected file.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> MimeType {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the file in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Check if the file has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
