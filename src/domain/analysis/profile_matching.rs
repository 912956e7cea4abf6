//! Profile Matching Engine - Gap analysis against an ideal profile.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use super::WeightNormalizer;
use crate::domain::foundation::{DecisionMatrix, FactorGroup, ScoringError};

/// Largest absolute gap the calibration table covers.
pub const MAX_GAP: i64 = 4;

/// Calibration weight for each integer gap in `[-MAX_GAP, MAX_GAP]`.
static GAP_WEIGHTS: Lazy<BTreeMap<i64, f64>> = Lazy::new(|| {
    BTreeMap::from([
        (-4, 3.0),
        (-3, 3.5),
        (-2, 4.0),
        (-1, 4.5),
        (0, 5.0),
        (1, 4.5),
        (2, 4.0),
        (3, 3.5),
        (4, 3.0),
    ])
});

/// Profile Matching functions.
pub struct ProfileMatchingEngine;

impl ProfileMatchingEngine {
    /// Calibration weight for a gap; gaps beyond ±4 are clamped first.
    pub fn gap_weight(gap: i64) -> f64 {
        let clamped = gap.clamp(-MAX_GAP, MAX_GAP);
        GAP_WEIGHTS.get(&clamped).copied().unwrap_or(0.0)
    }

    /// Weighted calibration score of one factor group.
    ///
    /// For each index: gap = round(actual - ideal), clamped to ±4, mapped
    /// through the calibration table and multiplied by its factor weight.
    pub fn gap_score(
        actual: &[f64],
        ideal: &[f64],
        factor_weights: &[f64],
    ) -> Result<f64, ScoringError> {
        if ideal.len() != actual.len() {
            return Err(ScoringError::shape("ideal profile", actual.len(), ideal.len()));
        }
        if factor_weights.len() != actual.len() {
            return Err(ScoringError::shape(
                "factor weights",
                actual.len(),
                factor_weights.len(),
            ));
        }

        Ok(actual
            .iter()
            .zip(ideal)
            .zip(factor_weights)
            .map(|((a, i), w)| Self::gap_weight((a - i).round() as i64) * w)
            .sum())
    }

    /// Final score of one alternative from its core and secondary groups.
    ///
    /// Members of a group share its weight equally. An empty group
    /// contributes 0.
    /// final = core_score * core_weight + secondary_score * (1 - core_weight)
    pub fn score(
        actual: &[f64],
        ideal: &[f64],
        core_indices: &[usize],
        secondary_indices: &[usize],
        core_weight: f64,
    ) -> Result<f64, ScoringError> {
        if !(0.0..=1.0).contains(&core_weight) {
            return Err(ScoringError::out_of_range("core_weight", 0.0, 1.0, core_weight));
        }
        if ideal.len() != actual.len() {
            return Err(ScoringError::shape("ideal profile", actual.len(), ideal.len()));
        }

        let core_score = Self::group_score(actual, ideal, core_indices)?;
        let secondary_score = Self::group_score(actual, ideal, secondary_indices)?;

        Ok(core_score * core_weight + secondary_score * (1.0 - core_weight))
    }

    /// Scores every alternative row against the ideal profile.
    pub fn score_all(
        matrix: &DecisionMatrix,
        ideal: &[f64],
        groups: &[FactorGroup],
        core_weight: f64,
    ) -> Result<Vec<f64>, ScoringError> {
        if groups.len() != matrix.column_count() {
            return Err(ScoringError::shape(
                "factor groups",
                matrix.column_count(),
                groups.len(),
            ));
        }

        let (core, secondary) = FactorGroup::partition(groups);
        matrix
            .rows()
            .iter()
            .map(|row| Self::score(row, ideal, &core, &secondary, core_weight))
            .collect()
    }

    fn group_score(actual: &[f64], ideal: &[f64], indices: &[usize]) -> Result<f64, ScoringError> {
        if indices.is_empty() {
            return Ok(0.0);
        }

        let mut group_actual = Vec::with_capacity(indices.len());
        let mut group_ideal = Vec::with_capacity(indices.len());
        for &index in indices {
            match (actual.get(index), ideal.get(index)) {
                (Some(a), Some(i)) => {
                    group_actual.push(*a);
                    group_ideal.push(*i);
                }
                _ => {
                    return Err(ScoringError::shape(
                        format!("profile index {}", index),
                        actual.len(),
                        index + 1,
                    ))
                }
            }
        }

        Self::gap_score(
            &group_actual,
            &group_ideal,
            &WeightNormalizer::equal(indices.len()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    // Gap table

    #[test]
    fn gap_weight_table_is_symmetric() {
        for gap in 0..=MAX_GAP {
            assert_eq!(
                ProfileMatchingEngine::gap_weight(gap),
                ProfileMatchingEngine::gap_weight(-gap)
            );
        }
        assert_eq!(ProfileMatchingEngine::gap_weight(0), 5.0);
        assert_eq!(ProfileMatchingEngine::gap_weight(2), 4.0);
        assert_eq!(ProfileMatchingEngine::gap_weight(-3), 3.5);
    }

    #[test]
    fn gap_weight_clamps_out_of_table() {
        assert_eq!(ProfileMatchingEngine::gap_weight(9), 3.0);
        assert_eq!(ProfileMatchingEngine::gap_weight(-12), 3.0);
    }

    // Gap score

    #[test]
    fn identical_profile_scores_maximum() {
        let profile = [3.0, 4.0, 2.0];
        let weights = [0.5, 0.3, 0.2];
        let score = ProfileMatchingEngine::gap_score(&profile, &profile, &weights).unwrap();
        assert_close(score, 5.0);
    }

    #[test]
    fn gap_score_weights_each_factor() {
        // gaps: +1, -2 -> 4.5, 4.0
        let score =
            ProfileMatchingEngine::gap_score(&[4.0, 1.0], &[3.0, 3.0], &[0.5, 0.5]).unwrap();
        assert_close(score, 4.25);
    }

    #[test]
    fn gap_score_rounds_fractional_gaps() {
        // 0.4 -> 0, 1.6 -> 2, -0.5 -> -1 (half away from zero)
        let score = ProfileMatchingEngine::gap_score(
            &[3.4, 4.6, 2.5],
            &[3.0, 3.0, 3.0],
            &[1.0, 1.0, 1.0],
        )
        .unwrap();
        assert_close(score, 5.0 + 4.0 + 4.5);
    }

    #[test]
    fn gap_score_clamping_is_idempotent() {
        let at_boundary =
            ProfileMatchingEngine::gap_score(&[5.0], &[1.0], &[1.0]).unwrap();
        let beyond = ProfileMatchingEngine::gap_score(&[20.0], &[1.0], &[1.0]).unwrap();
        assert_eq!(at_boundary, beyond);

        let below = ProfileMatchingEngine::gap_score(&[-20.0], &[1.0], &[1.0]).unwrap();
        assert_eq!(below, 3.0);
    }

    #[test]
    fn gap_score_length_mismatch() {
        let result = ProfileMatchingEngine::gap_score(&[1.0, 2.0], &[1.0], &[0.5, 0.5]);
        assert!(matches!(result, Err(ScoringError::ShapeMismatch { .. })));

        let result = ProfileMatchingEngine::gap_score(&[1.0, 2.0], &[1.0, 2.0], &[1.0]);
        assert!(matches!(result, Err(ScoringError::ShapeMismatch { .. })));
    }

    // Group aggregation

    #[test]
    fn score_combines_core_and_secondary() {
        let actual = [4.0, 3.0, 5.0];
        let ideal = [3.0, 3.0, 3.0];
        // core {0, 1}: (4.5 + 5.0) / 2 = 4.75; secondary {2}: 4.0
        let score = ProfileMatchingEngine::score(&actual, &ideal, &[0, 1], &[2], 0.6).unwrap();
        assert_close(score, 4.75 * 0.6 + 4.0 * 0.4);
    }

    #[test]
    fn empty_secondary_group_contributes_zero() {
        let score =
            ProfileMatchingEngine::score(&[3.0, 3.0], &[3.0, 3.0], &[0, 1], &[], 0.6).unwrap();
        assert_close(score, 5.0 * 0.6);
    }

    #[test]
    fn core_weight_outside_unit_interval_is_rejected() {
        let result = ProfileMatchingEngine::score(&[1.0], &[1.0], &[0], &[], 1.2);
        assert!(matches!(result, Err(ScoringError::OutOfRange { .. })));
    }

    #[test]
    fn index_out_of_bounds_is_shape_mismatch() {
        let result = ProfileMatchingEngine::score(&[1.0, 2.0], &[1.0, 2.0], &[0, 5], &[1], 0.5);
        assert!(matches!(result, Err(ScoringError::ShapeMismatch { .. })));
    }

    #[test]
    fn score_all_partitions_by_group_tag() {
        let matrix =
            DecisionMatrix::new(vec![vec![3.0, 3.0, 3.0], vec![7.0, 3.0, 1.0]]).unwrap();
        let groups = [FactorGroup::Core, FactorGroup::Core, FactorGroup::Secondary];
        let scores =
            ProfileMatchingEngine::score_all(&matrix, &[3.0, 3.0, 3.0], &groups, 0.6).unwrap();

        assert_close(scores[0], 5.0);
        // core: gap +4 -> 3.0, gap 0 -> 5.0, mean 4.0; secondary: gap -2 -> 4.0
        assert_close(scores[1], 4.0 * 0.6 + 4.0 * 0.4);
    }

    #[test]
    fn score_all_requires_group_per_column() {
        let matrix = DecisionMatrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let result =
            ProfileMatchingEngine::score_all(&matrix, &[1.0, 2.0], &[FactorGroup::Core], 0.5);
        assert!(matches!(result, Err(ScoringError::ShapeMismatch { .. })));
    }
}
