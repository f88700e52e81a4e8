//! fitsize WASM - WebAssembly bindings for fitsize
//!
//! This crate exposes the fitsize-core compressor and its presentation helpers
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `compress` - The Promise-returning `compress_image` entry point
//! - `output` - Type validation, size formatting, download naming
//! - `types` - WASM-compatible wrapper for the compressed result
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image, validate_mime, format_file_size } from '@fitsize/wasm';
//!
//! await init();
//!
//! validate_mime(file.type);
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = await compress_image(file.name, file.type, bytes);
//! console.log(`${format_file_size(result.size)} -> ${result.file_name}`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod output;
mod types;

// Re-export public types
pub use compress::compress_image;
pub use output::{
    budget_bytes, compressed_file_name, compression_ratio, data_url, format_file_size,
    initial_quality, is_supported_mime, validate_mime,
};
pub use types::JsCompressedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
