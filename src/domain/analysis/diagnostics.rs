//! Advisory diagnostics reported alongside scores.
//!
//! Diagnostics never block scoring; presentation layers decide whether to
//! show them as warnings.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AHPOutcome, WeightNormalizer};

/// Which pairwise matrix a consistency diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "matrix", rename_all = "snake_case")]
pub enum ComparisonScope {
    Criteria,
    Alternatives { criterion: usize },
}

/// A non-fatal observation about scoring inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Criterion weights do not add up to one.
    WeightsDoNotSumToOne { sum: f64 },
    /// A pairwise matrix's consistency ratio exceeds the threshold.
    InconsistentComparisons { scope: ComparisonScope, ratio: f64 },
}

impl Diagnostic {
    /// Checks a weight vector against the unit-sum convention.
    pub fn check_weights(weights: &[f64], tolerance: f64) -> Option<Diagnostic> {
        if WeightNormalizer::sums_to_one(weights, tolerance) {
            return None;
        }
        Some(Diagnostic::WeightsDoNotSumToOne {
            sum: weights.iter().sum(),
        })
    }

    /// Lists every AHP matrix whose consistency ratio exceeds `threshold`.
    pub fn check_consistency(outcome: &AHPOutcome, threshold: f64) -> Vec<Diagnostic> {
        let criteria = Some(outcome.criteria_consistency_ratio)
            .filter(|ratio| *ratio > threshold)
            .map(|ratio| Diagnostic::InconsistentComparisons {
                scope: ComparisonScope::Criteria,
                ratio,
            });

        let alternatives = outcome
            .alternative_consistency_ratios
            .iter()
            .enumerate()
            .filter(|(_, ratio)| **ratio > threshold)
            .map(|(criterion, ratio)| Diagnostic::InconsistentComparisons {
                scope: ComparisonScope::Alternatives { criterion },
                ratio: *ratio,
            });

        criteria.into_iter().chain(alternatives).collect()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::WeightsDoNotSumToOne { sum } => {
                write!(f, "Weights sum to {:.4}, not 1", sum)
            }
            Diagnostic::InconsistentComparisons {
                scope: ComparisonScope::Criteria,
                ratio,
            } => write!(f, "Criteria consistency ratio {:.4} is too high", ratio),
            Diagnostic::InconsistentComparisons {
                scope: ComparisonScope::Alternatives { criterion },
                ratio,
            } => write!(
                f,
                "Alternative consistency ratio {:.4} for criterion {} is too high",
                ratio, criterion
            ),
        }
    }
}
