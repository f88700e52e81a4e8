//! Compression WASM bindings.
//!
//! Exposes the fitsize-core orchestrator to JavaScript as a Promise-returning
//! function. The module is meant to be loaded in a Web Worker; encoding runs
//! inline on that worker, so the page's main thread stays responsive.
//!
//! # Example
//!
//! ```typescript
//! import { compress_image } from '@fitsize/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = await compress_image(file.name, file.type, bytes);
//! console.log(`${result.file_name}: ${result.size} bytes (${result.ratio}% smaller)`);
//! ```

use fitsize_core::{
    CompressionBudget, Compressor, EncoderConfig, RasterEncoder, SourceImage,
    COMPRESSION_FAILED_MESSAGE,
};
use wasm_bindgen::prelude::*;

use crate::types::JsCompressedImage;

/// Compress an image to fit under the 999 KB budget.
///
/// # Arguments
///
/// * `name` - Original file name, used for the download name
/// * `mime` - MIME type of the file (`image/jpeg` or `image/png`)
/// * `bytes` - File contents as a `Uint8Array`
/// * `config` - Optional encoder settings object; missing fields use defaults
///
/// # Returns
///
/// A Promise resolving to a `JsCompressedImage`. The result may still exceed
/// the budget after the one escalated retry; check `within_budget`.
///
/// # Errors
///
/// Rejects with the validation message for unsupported types, or with a
/// generic failure message when encoding fails (details go to the console).
#[wasm_bindgen]
pub async fn compress_image(
    name: String,
    mime: String,
    bytes: Vec<u8>,
    config: JsValue,
) -> Result<JsCompressedImage, JsValue> {
    let source = SourceImage::new(name, &mime, bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let config = parse_config(config)?;

    let compressor = Compressor::new(RasterEncoder::new(config));
    match compressor.compress(&source, CompressionBudget::DEFAULT).await {
        Ok(result) => Ok(JsCompressedImage::new(result, source.name(), source.size())),
        Err(e) => {
            web_sys::console::error_1(&JsValue::from_str(&format!("Error compressing image: {}", e)));
            Err(JsValue::from_str(COMPRESSION_FAILED_MESSAGE))
        }
    }
}

/// Read an optional `EncoderConfig` from a JS object.
pub(crate) fn parse_config(value: JsValue) -> Result<EncoderConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EncoderConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid encoder config: {}", e)))
}
