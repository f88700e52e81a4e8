//! Shared test utilities: generated fixture images and a scripted encoder.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use crate::encode::{EncodeError, ImageEncoder};
use crate::params::EncodeParameters;
use crate::source::SourceImage;

// =========================================================================
// Fixture images
// =========================================================================

/// Smooth RGB gradient.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    gradient_image(width, height)
        .write_to(&mut out, ImageFormat::Jpeg)
        .unwrap();
    out.into_inner()
}

/// RGBA gradient with varying transparency.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            64,
            ((x + y) % 256) as u8,
        ])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Pseudo-random noise, which compresses poorly, encoded at `quality`.
pub fn noisy_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    let img = RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        };
        Rgb([next(), next(), next()])
    });

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(&DynamicImage::ImageRgb8(img))
        .unwrap();
    out.into_inner()
}

// =========================================================================
// Scripted encoder
// =========================================================================

/// One scripted encoder response.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Return this many zero bytes.
    Size(u64),
    /// Return exactly these bytes.
    Bytes(Vec<u8>),
    /// Fail with `EncodeError::EncodingFailed`.
    Fail,
}

/// Mock encoder that records every call and replays scripted responses.
/// Uses Mutex (not RefCell) so it is Sync as the trait requires.
#[derive(Debug, Default)]
pub struct MockEncoder {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<EncodeParameters>>,
    deterministic: bool,
}

impl MockEncoder {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    /// Output derived only from the source size and parameters.
    pub fn deterministic() -> Self {
        Self {
            deterministic: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<EncodeParameters> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageEncoder for MockEncoder {
    async fn encode(
        &self,
        source: &SourceImage,
        params: &EncodeParameters,
    ) -> Result<Vec<u8>, EncodeError> {
        self.calls.lock().unwrap().push(*params);

        if self.deterministic {
            let len = (source.size() as f64 * params.quality as f64 * 0.5) as usize;
            let fill = (params.max_dimension % 251) as u8;
            return Ok(vec![fill; len]);
        }

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Size(n)) => Ok(vec![0u8; n as usize]),
            Some(Scripted::Bytes(bytes)) => Ok(bytes),
            Some(Scripted::Fail) => Err(EncodeError::EncodingFailed("scripted failure".to_string())),
            None => Err(EncodeError::EncodingFailed("script exhausted".to_string())),
        }
    }
}
