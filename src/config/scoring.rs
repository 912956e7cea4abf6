//! Scoring configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::{CONSISTENCY_THRESHOLD, WEIGHT_SUM_TOLERANCE};

/// Thresholds and defaults applied around the scoring engines
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// Consistency ratio above which an AHP matrix is reported as inconsistent
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Allowed deviation of a weight sum from 1 before it is reported
    #[serde(default = "default_weight_sum_tolerance")]
    pub weight_sum_tolerance: f64,

    /// Check the reciprocal invariant of pairwise matrices on ingestion
    #[serde(default = "default_verify_reciprocal")]
    pub verify_reciprocal: bool,

    /// Allowed deviation from `a(i,j) * a(j,i) = 1` when ingesting pairwise matrices
    #[serde(default = "default_reciprocal_tolerance")]
    pub reciprocal_tolerance: f64,

    /// Profile Matching core factor weight when a request omits it
    #[serde(default = "default_core_weight")]
    pub default_core_weight: f64,

    /// Rescale SAW weights that do not sum to 1 instead of only reporting them
    #[serde(default)]
    pub normalize_saw_weights: bool,
}

impl ScoringConfig {
    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.consistency_threshold > 0.0) {
            return Err(ValidationError::InvalidConsistencyThreshold);
        }
        if !is_positive_finite(self.weight_sum_tolerance) {
            return Err(ValidationError::InvalidTolerance("weight_sum_tolerance"));
        }
        if !is_positive_finite(self.reciprocal_tolerance) {
            return Err(ValidationError::InvalidTolerance("reciprocal_tolerance"));
        }
        if !(0.0..=1.0).contains(&self.default_core_weight) {
            return Err(ValidationError::InvalidCoreWeight);
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_consistency_threshold(),
            weight_sum_tolerance: default_weight_sum_tolerance(),
            verify_reciprocal: default_verify_reciprocal(),
            reciprocal_tolerance: default_reciprocal_tolerance(),
            default_core_weight: default_core_weight(),
            normalize_saw_weights: false,
        }
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn default_consistency_threshold() -> f64 {
    CONSISTENCY_THRESHOLD
}

fn default_weight_sum_tolerance() -> f64 {
    WEIGHT_SUM_TOLERANCE
}

fn default_verify_reciprocal() -> bool {
    true
}

// Covers judgments typed as rounded inverses, e.g. 0.333 for 1/3
fn default_reciprocal_tolerance() -> f64 {
    1e-2
}

fn default_core_weight() -> f64 {
    0.6
}
