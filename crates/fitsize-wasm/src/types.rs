//! WASM-compatible wrapper types for compression results.
//!
//! This module provides JavaScript-friendly types that wrap the core fitsize
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use fitsize_core::{output, Attempt, CompressedImage};
use wasm_bindgen::prelude::*;

/// A compressed image wrapper for JavaScript.
///
/// # Memory Management
///
/// The encoded bytes are stored in WASM memory. When you call `bytes()`, a
/// copy is made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsCompressedImage {
    inner: CompressedImage,
    file_name: String,
    original_size: u64,
}

#[wasm_bindgen]
impl JsCompressedImage {
    /// Encoded bytes as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    /// Size of the compressed file in bytes.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> f64 {
        self.inner.size() as f64
    }

    /// Size of the file that was compressed.
    #[wasm_bindgen(getter)]
    pub fn original_size(&self) -> f64 {
        self.original_size as f64
    }

    /// MIME type, same as the source.
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime().as_str().to_string()
    }

    /// Quality factor of the attempt that produced this image.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.params().quality
    }

    /// Max dimension of the attempt that produced this image.
    #[wasm_bindgen(getter)]
    pub fn max_dimension(&self) -> u32 {
        self.inner.params().max_dimension
    }

    /// True when the fixed escalated parameters were needed.
    #[wasm_bindgen(getter)]
    pub fn escalated(&self) -> bool {
        self.inner.attempt() == Attempt::Escalated
    }

    /// True when the output is within the budget it was compressed for.
    #[wasm_bindgen(getter)]
    pub fn within_budget(&self) -> bool {
        self.inner.size() <= self.inner.params().target_budget
    }

    /// Suggested download name: `<base>-compressed<ext>`.
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// Percentage saved relative to the original.
    #[wasm_bindgen(getter)]
    pub fn ratio(&self) -> i32 {
        output::compression_ratio(self.original_size, self.inner.size()) as i32
    }

    /// `data:` URL for an `<img>` preview.
    pub fn data_url(&self) -> String {
        output::data_url(self.inner.mime(), self.inner.bytes())
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCompressedImage {
    pub(crate) fn new(inner: CompressedImage, source_name: &str, original_size: u64) -> Self {
        Self {
            file_name: output::compressed_file_name(source_name),
            inner,
            original_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitsize_core::{CompressionBudget, EncodeParameters, MimeType};

    fn sample(size: usize, attempt: Attempt) -> JsCompressedImage {
        let params = match attempt {
            Attempt::Initial => EncodeParameters::initial(4000, CompressionBudget::new(1000)),
            Attempt::Escalated => EncodeParameters::escalated(CompressionBudget::new(1000)),
        };
        let inner = CompressedImage::new(vec![1u8; size], MimeType::Png, params, attempt);
        JsCompressedImage::new(inner, "logo.png", 4000)
    }

    #[test]
    fn test_accessors() {
        let img = sample(1000, Attempt::Initial);
        assert_eq!(img.size(), 1000.0);
        assert_eq!(img.original_size(), 4000.0);
        assert_eq!(img.mime(), "image/png");
        assert_eq!(img.quality(), 0.8);
        assert_eq!(img.max_dimension(), 1920);
        assert!(!img.escalated());
        assert!(img.within_budget());
        assert_eq!(img.file_name(), "logo-compressed.png");
        assert_eq!(img.ratio(), 75);
        assert_eq!(img.bytes().len(), 1000);
    }

    #[test]
    fn test_escalated_over_budget() {
        let img = sample(1200, Attempt::Escalated);
        assert!(img.escalated());
        assert!(!img.within_budget());
        assert_eq!(img.max_dimension(), 1280);
        assert!(img.data_url().starts_with("data:image/png;base64,"));
    }
}
