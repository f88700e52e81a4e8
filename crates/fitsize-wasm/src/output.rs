//! Validation and presentation helper bindings.
//!
//! Small synchronous functions a UI needs around a compression run: checking
//! the selected type up front, showing sizes, and naming the download.

use fitsize_core::{output, params, CompressionBudget, MimeType};
use wasm_bindgen::prelude::*;

/// Check that a MIME type is accepted (JPEG or PNG).
///
/// # Errors
///
/// Returns the user-facing validation message for any other type.
#[wasm_bindgen]
pub fn validate_mime(mime: &str) -> Result<(), JsValue> {
    MimeType::from_mime(mime)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check a MIME type without raising.
#[wasm_bindgen]
pub fn is_supported_mime(mime: &str) -> bool {
    MimeType::from_mime(mime).is_ok()
}

/// Byte budget every compression run targets (999 KB).
#[wasm_bindgen]
pub fn budget_bytes() -> f64 {
    CompressionBudget::DEFAULT.bytes() as f64
}

/// Quality factor the first attempt will use for a file of `size` bytes.
#[wasm_bindgen]
pub fn initial_quality(size: f64) -> f32 {
    params::initial_quality(size.max(0.0) as u64)
}

/// Download name: `<base>-compressed<ext>`.
#[wasm_bindgen]
pub fn compressed_file_name(name: &str) -> String {
    output::compressed_file_name(name)
}

/// Human-readable size ("512 B", "1.50 KB", "2.00 MB").
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    output::format_file_size(bytes.max(0.0) as u64)
}

/// Percentage saved, rounded.
#[wasm_bindgen]
pub fn compression_ratio(original: f64, compressed: f64) -> i32 {
    output::compression_ratio(original.max(0.0) as u64, compressed.max(0.0) as u64) as i32
}

/// `data:` URL for previewing the original file.
///
/// # Errors
///
/// Returns the validation message for unsupported types.
#[wasm_bindgen]
pub fn data_url(mime: &str, bytes: &[u8]) -> Result<String, JsValue> {
    let mime = MimeType::from_mime(mime).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(output::data_url(mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that work on all targets

    #[test]
    fn test_is_supported_mime() {
        assert!(is_supported_mime("image/jpeg"));
        assert!(is_supported_mime("image/png"));
        assert!(!is_supported_mime("image/gif"));
    }

    #[test]
    fn test_budget_bytes() {
        assert_eq!(budget_bytes(), 1_022_976.0);
    }

    #[test]
    fn test_initial_quality() {
        assert_eq!(initial_quality(500.0 * 1024.0), 0.8);
        assert_eq!(initial_quality(12.0 * 1024.0 * 1024.0), 0.5);
        assert_eq!(initial_quality(-1.0), 0.8);
    }

    #[test]
    fn test_naming_and_sizes() {
        assert_eq!(compressed_file_name("cat.png"), "cat-compressed.png");
        assert_eq!(format_file_size(2048.0), "2.00 KB");
        assert_eq!(compression_ratio(200.0, 50.0), 75);
    }
}
