//! Weight Normalizer - Rescales criterion weights to sum to one.

use crate::domain::foundation::ScoringError;

/// Default tolerance for the advisory "weights sum to one" check.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weight normalization functions.
pub struct WeightNormalizer;

impl WeightNormalizer {
    /// Returns `weights[i] / Σ weights` for each weight.
    ///
    /// # Errors
    /// - `OutOfRange` if any weight is negative
    /// - `DivisionByZero` if the weights sum to zero (including an empty slice)
    pub fn normalize(weights: &[f64]) -> Result<Vec<f64>, ScoringError> {
        if let Some(&negative) = weights.iter().find(|w| **w < 0.0) {
            return Err(ScoringError::out_of_range("weight", 0.0, f64::MAX, negative));
        }

        let total: f64 = weights.iter().sum();
        if total == 0.0 {
            return Err(ScoringError::DivisionByZero);
        }

        Ok(weights.iter().map(|w| w / total).collect())
    }

    /// Checks whether the weights already sum to one within `tolerance`.
    ///
    /// Advisory only: scoring never refuses weights that fail this check.
    pub fn sums_to_one(weights: &[f64], tolerance: f64) -> bool {
        let total: f64 = weights.iter().sum();
        (total - 1.0).abs() <= tolerance
    }

    /// Equal weights `1/n` for a group of `n` members. Empty for `n = 0`.
    pub fn equal(n: usize) -> Vec<f64> {
        if n == 0 {
            return Vec::new();
        }
        vec![1.0 / n as f64; n]
    }
}
