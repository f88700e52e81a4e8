//! Encoding parameters and the size-to-quality heuristic.
//!
//! The first attempt picks its quality from the input size: bigger files are
//! assumed to carry more redundancy, so they start at a lower quality. The
//! escalated attempt uses a fixed, more aggressive parameter set.

use serde::{Deserialize, Serialize};

const MIB: u64 = 1024 * 1024;

/// Longest edge allowed on the first attempt.
pub const INITIAL_MAX_DIMENSION: u32 = 1920;

/// Longest edge allowed on the escalated attempt.
pub const ESCALATED_MAX_DIMENSION: u32 = 1280;

/// Quality used on the escalated attempt.
pub const ESCALATED_QUALITY: f32 = 0.5;

/// Size thresholds in descending order, each with the quality used for
/// inputs strictly larger than it.
const QUALITY_STEPS: [(u64, f32); 3] = [(10 * MIB, 0.5), (5 * MIB, 0.6), (2 * MIB, 0.7)];

/// Quality for inputs of 2 MiB or less.
const DEFAULT_QUALITY: f32 = 0.8;

/// Pick the initial quality factor for a source of `size` bytes.
///
/// | size            | quality |
/// |-----------------|---------|
/// | > 10 MiB        | 0.5     |
/// | > 5 MiB         | 0.6     |
/// | > 2 MiB         | 0.7     |
/// | otherwise       | 0.8     |
///
/// Comparisons are strict, so a file of exactly 10 MiB gets 0.6.
pub fn initial_quality(size: u64) -> f32 {
    QUALITY_STEPS
        .iter()
        .find(|(threshold, _)| size > *threshold)
        .map(|(_, quality)| *quality)
        .unwrap_or(DEFAULT_QUALITY)
}

/// Maximum acceptable output size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompressionBudget(u64);

impl CompressionBudget {
    /// 999 KiB, the budget every UI run uses.
    pub const DEFAULT: CompressionBudget = CompressionBudget(999 * 1024);

    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Check if `size` bytes fit within the budget.
    pub const fn allows(self, size: u64) -> bool {
        size <= self.0
    }
}

impl Default for CompressionBudget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which attempt of a compression run produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attempt {
    Initial,
    Escalated,
}

impl Attempt {
    /// 1-based attempt number, for logs and error messages.
    pub fn number(self) -> u8 {
        match self {
            Attempt::Initial => 1,
            Attempt::Escalated => 2,
        }
    }
}

/// Parameters for one encode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodeParameters {
    /// Lossy fidelity in (0, 1]; lower is smaller.
    pub quality: f32,
    /// Longest edge of the output in pixels.
    pub max_dimension: u32,
    /// Size the encoder should try to get under.
    pub target_budget: u64,
}

impl EncodeParameters {
    /// Parameters for the first attempt on a source of `source_size` bytes.
    pub fn initial(source_size: u64, budget: CompressionBudget) -> Self {
        Self {
            quality: initial_quality(source_size),
            max_dimension: INITIAL_MAX_DIMENSION,
            target_budget: budget.bytes(),
        }
    }

    /// Fixed parameters for the retry after an overshoot.
    pub fn escalated(budget: CompressionBudget) -> Self {
        Self {
            quality: ESCALATED_QUALITY,
            max_dimension: ESCALATED_MAX_DIMENSION,
            target_budget: budget.bytes(),
        }
    }

    /// Quality on the 1-100 JPEG scale.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_quality_tiers() {
        assert_eq!(initial_quality(0), 0.8);
        assert_eq!(initial_quality(500 * 1024), 0.8);
        assert_eq!(initial_quality(3 * MIB), 0.7);
        assert_eq!(initial_quality(6 * MIB), 0.6);
        assert_eq!(initial_quality(12 * MIB), 0.5);
        assert_eq!(initial_quality(u64::MAX), 0.5);
    }

    #[test]
    fn test_initial_quality_boundaries_are_strict() {
        assert_eq!(initial_quality(10 * MIB), 0.6);
        assert_eq!(initial_quality(10 * MIB + 1), 0.5);

        assert_eq!(initial_quality(5 * MIB), 0.7);
        assert_eq!(initial_quality(5 * MIB + 1), 0.6);

        assert_eq!(initial_quality(2 * MIB), 0.8);
        assert_eq!(initial_quality(2 * MIB + 1), 0.7);
    }

    #[test]
    fn test_default_budget() {
        assert_eq!(CompressionBudget::DEFAULT.bytes(), 1_022_976);
        assert_eq!(CompressionBudget::default(), CompressionBudget::DEFAULT);
        assert!(CompressionBudget::DEFAULT.allows(1_022_976));
        assert!(!CompressionBudget::DEFAULT.allows(1_022_977));
    }

    #[test]
    fn test_initial_parameters() {
        let params = EncodeParameters::initial(12 * MIB, CompressionBudget::DEFAULT);
        assert_eq!(params.quality, 0.5);
        assert_eq!(params.max_dimension, 1920);
        assert_eq!(params.target_budget, 1_022_976);
    }

    #[test]
    fn test_escalated_parameters_ignore_initial_quality() {
        let budget = CompressionBudget::new(50_000);
        let params = EncodeParameters::escalated(budget);
        assert_eq!(params.quality, 0.5);
        assert_eq!(params.max_dimension, 1280);
        assert_eq!(params.target_budget, 50_000);
    }

    #[test]
    fn test_jpeg_quality_mapping() {
        let mut params = EncodeParameters::escalated(CompressionBudget::DEFAULT);
        assert_eq!(params.jpeg_quality(), 50);

        params.quality = 0.8;
        assert_eq!(params.jpeg_quality(), 80);

        params.quality = 0.0;
        assert_eq!(params.jpeg_quality(), 1);

        params.quality = 1.5;
        assert_eq!(params.jpeg_quality(), 100);
    }

    #[test]
    fn test_attempt_numbers() {
        assert_eq!(Attempt::Initial.number(), 1);
        assert_eq!(Attempt::Escalated.number(), 2);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
