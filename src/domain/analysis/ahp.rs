//! AHP Engine - Priority derivation, consistency checking and aggregation
//! for the Analytic Hierarchy Process.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PairwiseMatrix, ScoringError};

/// Random consistency index by matrix size, indices 1 through 10.
const RANDOM_INDEX: [f64; 10] = [0.00, 0.00, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Random index used for matrices larger than the table covers.
const RANDOM_INDEX_FALLBACK: f64 = 1.49;

/// Conventional acceptability threshold for the consistency ratio.
pub const CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Priority vector and consistency diagnostics for one pairwise matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    /// Priority weights, summing to 1.
    pub priority_weights: Vec<f64>,
    /// Principal eigenvalue approximation.
    pub lambda_max: f64,
    /// `(λmax - k) / (k - 1)`, zero for `k <= 2`.
    pub consistency_index: f64,
    /// `CI / RI(k)`, zero when `RI(k)` is zero.
    pub consistency_ratio: f64,
}

impl ConsistencyResult {
    /// True when the ratio does not exceed `threshold`.
    pub fn is_consistent(&self, threshold: f64) -> bool {
        self.consistency_ratio <= threshold
    }
}

/// Full AHP outcome: aggregated scores plus every consistency ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AHPOutcome {
    /// Final score per alternative.
    pub final_scores: Vec<f64>,
    /// Priority weight per criterion.
    pub criteria_weights: Vec<f64>,
    /// Consistency ratio of the criteria matrix.
    pub criteria_consistency_ratio: f64,
    /// Consistency ratio of each per-criterion alternative matrix.
    pub alternative_consistency_ratios: Vec<f64>,
}

/// Analytic Hierarchy Process functions.
pub struct AHPEngine;

impl AHPEngine {
    /// Random consistency index `RI(k)`.
    pub fn random_index(size: usize) -> f64 {
        match size {
            0 => 0.0,
            k => RANDOM_INDEX
                .get(k - 1)
                .copied()
                .unwrap_or(RANDOM_INDEX_FALLBACK),
        }
    }

    /// Derives priority weights and the consistency ratio of a pairwise matrix.
    ///
    /// # Algorithm
    /// 1. Divide each entry by its column sum
    /// 2. weight[i] = mean of row i of the normalized matrix
    /// 3. λmax = mean_i((A · w)[i] / w[i])
    /// 4. CI = (λmax - k) / (k - 1), or 0 for k <= 2
    /// 5. CR = CI / RI(k), or 0 when RI(k) = 0
    ///
    /// # Errors
    /// - `DegenerateMatrix` if a column sums to zero or a weight is exactly zero
    pub fn derive_priorities(pairwise: &PairwiseMatrix) -> Result<ConsistencyResult, ScoringError> {
        let size = pairwise.size();
        let column_sums = pairwise.column_sums();

        if let Some(index) = column_sums.iter().position(|sum| *sum == 0.0) {
            return Err(ScoringError::DegenerateMatrix { index });
        }

        let weights: Vec<f64> = pairwise
            .rows()
            .iter()
            .map(|row| {
                let normalized_sum: f64 = row.iter().zip(&column_sums).map(|(v, s)| v / s).sum();
                normalized_sum / size as f64
            })
            .collect();

        if let Some(index) = weights.iter().position(|w| *w == 0.0) {
            return Err(ScoringError::DegenerateMatrix { index });
        }

        let weighted = pairwise.multiply(&weights);
        let lambda_max = weighted
            .iter()
            .zip(&weights)
            .map(|(aw, w)| aw / w)
            .sum::<f64>()
            / size as f64;

        let consistency_index = if size <= 2 {
            0.0
        } else {
            (lambda_max - size as f64) / (size as f64 - 1.0)
        };

        let random_index = Self::random_index(size);
        let consistency_ratio = if random_index == 0.0 {
            0.0
        } else {
            consistency_index / random_index
        };

        Ok(ConsistencyResult {
            priority_weights: weights,
            lambda_max,
            consistency_index,
            consistency_ratio,
        })
    }

    /// Aggregates criteria and per-criterion alternative comparisons into final scores.
    ///
    /// `alternative_matrices[c]` compares the alternatives under criterion `c`,
    /// so there must be one per criterion and all must have the same size.
    /// final[a] = Σ_c criteria_weight[c] * alternative_priority[c][a]
    pub fn score(
        criteria_matrix: &PairwiseMatrix,
        alternative_matrices: &[PairwiseMatrix],
    ) -> Result<AHPOutcome, ScoringError> {
        let criteria_count = criteria_matrix.size();
        if alternative_matrices.len() != criteria_count {
            return Err(ScoringError::shape(
                "alternative matrices",
                criteria_count,
                alternative_matrices.len(),
            ));
        }

        let alternative_count = alternative_matrices
            .first()
            .map(PairwiseMatrix::size)
            .unwrap_or(0);
        if let Some(odd) = alternative_matrices
            .iter()
            .find(|m| m.size() != alternative_count)
        {
            return Err(ScoringError::shape(
                "alternative matrix size",
                alternative_count,
                odd.size(),
            ));
        }

        let criteria = Self::derive_priorities(criteria_matrix)?;
        let alternatives = alternative_matrices
            .iter()
            .map(Self::derive_priorities)
            .collect::<Result<Vec<_>, _>>()?;

        let mut final_scores = vec![0.0; alternative_count];
        for (criterion_weight, result) in criteria.priority_weights.iter().zip(&alternatives) {
            for (score, priority) in final_scores.iter_mut().zip(&result.priority_weights) {
                *score += criterion_weight * priority;
            }
        }

        Ok(AHPOutcome {
            final_scores,
            criteria_weights: criteria.priority_weights,
            criteria_consistency_ratio: criteria.consistency_ratio,
            alternative_consistency_ratios: alternatives
                .iter()
                .map(|r| r.consistency_ratio)
                .collect(),
        })
    }
}
