//! Tuning for the raster encoder's best-effort size search.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;

/// Settings for [`super::RasterEncoder`].
///
/// Missing fields take their defaults when deserialized, so callers can pass
/// a partial object from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Resampling filter used when downscaling.
    pub filter: FilterType,
    /// Maximum encode passes per call, including the first one.
    pub max_iterations: u32,
    /// How much JPEG quality drops between passes.
    pub quality_step: f32,
    /// JPEG quality never goes below this.
    pub min_quality: f32,
    /// Factor applied to both edges when a pass shrinks the image.
    pub scale_step: f32,
    /// Return the untouched source when it is smaller than every re-encode
    /// and already within the dimension limit.
    pub keep_smaller_original: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            filter: FilterType::Bilinear,
            max_iterations: 10,
            quality_step: 0.05,
            min_quality: 0.1,
            scale_step: 0.95,
            keep_smaller_original: true,
        }
    }
}

impl EncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A config that performs exactly one pass with the given parameters.
    pub fn single_pass() -> Self {
        Self {
            max_iterations: 1,
            keep_smaller_original: false,
            ..Self::default()
        }
    }

    /// Clamp values into workable ranges.
    ///
    /// Non-finite values fall back to their defaults.
    pub(crate) fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f32, default: f32| if value.is_finite() { value } else { default };

        let scale_step = finite_or(self.scale_step, defaults.scale_step);
        Self {
            filter: self.filter,
            max_iterations: self.max_iterations.max(1),
            quality_step: finite_or(self.quality_step, defaults.quality_step).clamp(0.0, 1.0),
            min_quality: finite_or(self.min_quality, defaults.min_quality).clamp(0.01, 1.0),
            scale_step: if scale_step > 0.0 && scale_step < 1.0 {
                scale_step
            } else {
                1.0
            },
            keep_smaller_original: self.keep_smaller_original,
        }
    }
}
