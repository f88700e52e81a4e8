//! Presentation helpers: download names, readable sizes, previews.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::source::MimeType;

/// Download name for a compressed file: `<base>-compressed<ext>`.
///
/// The extension is everything from the last `.`, so `a.b.jpg` becomes
/// `a.b-compressed.jpg` and a name without a dot gets no extension.
pub fn compressed_file_name(original: &str) -> String {
    let original = if original.is_empty() { "image" } else { original };
    let (base, ext) = match original.rfind('.') {
        Some(idx) => original.split_at(idx),
        None => (original, ""),
    };
    format!("{base}-compressed{ext}")
}

/// Human-readable size: bytes below 1 KB, otherwise KB or MB with two
/// decimals (1 KB = 1024 bytes).
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}

/// Percentage saved, rounded to the nearest whole number.
///
/// Negative when the output grew. Returns 0 for an empty original.
pub fn compression_ratio(original: u64, compressed: u64) -> i64 {
    if original == 0 {
        return 0;
    }
    ((1.0 - compressed as f64 / original as f64) * 100.0).round() as i64
}

/// Inline `data:` URL for previewing image bytes.
pub fn data_url(mime: MimeType, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime.as_str(), STANDARD.encode(bytes))
}
