//! SAW Engine - Simple Additive Weighting over a decision matrix.

use crate::domain::foundation::{
    CriterionGroup, CriterionKind, CriterionSpec, DecisionMatrix, ScoringError,
};

/// Simple Additive Weighting functions.
pub struct SAWEngine;

impl SAWEngine {
    /// Scores every alternative as the weighted sum of its normalized row.
    ///
    /// # Algorithm
    /// For each column j:
    /// - Benefit: `x[i][j] / max_i x[i][j]`
    /// - Cost: `min_i x[i][j] / x[i][j]`
    ///
    /// score[i] = Σ_j normalized[i][j] * weights[j]
    ///
    /// Weights are used as given; they are not required to sum to one.
    pub fn score(
        matrix: &DecisionMatrix,
        weights: &[f64],
        kinds: &[CriterionKind],
    ) -> Result<Vec<f64>, ScoringError> {
        if weights.len() != matrix.column_count() {
            return Err(ScoringError::shape("weights", matrix.column_count(), weights.len()));
        }

        let normalized = Self::normalize_matrix(matrix, kinds)?;

        Ok(normalized
            .iter()
            .map(|row| row.iter().zip(weights).map(|(value, weight)| value * weight).sum())
            .collect())
    }

    /// Scores using the weight and kind carried by each criterion.
    pub fn score_criteria(
        matrix: &DecisionMatrix,
        criteria: &[CriterionSpec],
    ) -> Result<Vec<f64>, ScoringError> {
        let weights: Vec<f64> = criteria.iter().map(|c| c.weight).collect();
        let kinds: Vec<CriterionKind> = criteria.iter().map(|c| c.kind).collect();
        Self::score(matrix, &weights, &kinds)
    }

    /// Normalizes each column by its maximum (Benefit) or minimum (Cost).
    ///
    /// # Edge Cases
    /// - A Benefit column's best value becomes exactly 1.0
    /// - A Cost column's smallest value becomes exactly 1.0, larger raw values
    ///   score proportionally less
    /// - A zero maximum or minimum is a `DegenerateColumn` error
    pub fn normalize_matrix(
        matrix: &DecisionMatrix,
        kinds: &[CriterionKind],
    ) -> Result<Vec<Vec<f64>>, ScoringError> {
        if kinds.len() != matrix.column_count() {
            return Err(ScoringError::shape("criterion kinds", matrix.column_count(), kinds.len()));
        }

        let denominators = kinds
            .iter()
            .enumerate()
            .map(|(column, kind)| Self::denominator(matrix, column, *kind))
            .collect::<Result<Vec<f64>, ScoringError>>()?;

        Ok(matrix
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .zip(kinds.iter().zip(&denominators))
                    .map(|(value, (kind, d))| match kind {
                        CriterionKind::Benefit => value / d,
                        CriterionKind::Cost => d / value,
                    })
                    .collect()
            })
            .collect())
    }

    /// Column maximum for Benefit, minimum for Cost.
    fn denominator(
        matrix: &DecisionMatrix,
        column: usize,
        kind: CriterionKind,
    ) -> Result<f64, ScoringError> {
        let values = matrix.column(column);
        let denominator = match kind {
            CriterionKind::Benefit => values.fold(f64::NEG_INFINITY, f64::max),
            CriterionKind::Cost => values.fold(f64::INFINITY, f64::min),
        };

        if denominator == 0.0 {
            return Err(ScoringError::DegenerateColumn {
                column,
                kind: kind.label(),
            });
        }

        Ok(denominator)
    }

    /// Flattens main criteria with sub-criteria into scoring columns.
    ///
    /// Each sub-criterion becomes a column named `"main - sub"` with effective
    /// weight `main.weight * sub.weight / Σ sub.weight`. When the sub weights sum
    /// to zero every column of that group gets weight 0.
    pub fn flatten_criteria(groups: &[CriterionGroup]) -> Vec<CriterionSpec> {
        let mut columns = Vec::new();

        for group in groups {
            let sub_total: f64 = group.sub_criteria.iter().map(|s| s.weight).sum();
            for sub in &group.sub_criteria {
                let share = if sub_total != 0.0 {
                    sub.weight / sub_total
                } else {
                    0.0
                };
                columns.push(CriterionSpec::new(
                    format!("{} - {}", group.name, sub.name),
                    sub.kind,
                    group.weight * share,
                ));
            }
        }

        columns
    }
}
