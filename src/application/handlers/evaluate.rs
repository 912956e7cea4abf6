//! EvaluationHandler - Runs one scoring method and ranks the result.
//!
//! Dispatches an `EvaluationRequest` to the matching engine:
//! - Normalize → WeightNormalizer
//! - Saw → SAWEngine (flat or grouped criteria)
//! - Ahp → AHPEngine, with reciprocal check and consistency diagnostics
//! - ProfileMatching → ProfileMatchingEngine
//!
//! Every scored method passes its scores through `Ranking` and reports
//! advisory diagnostics without failing on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::domain::analysis::{
    AHPEngine, Diagnostic, ProfileMatchingEngine, RankedAlternative, Ranking, SAWEngine,
    WeightNormalizer,
};
use crate::domain::foundation::{
    CriterionGroup, CriterionSpec, DecisionMatrix, FactorGroup, PairwiseMatrix, ScoringError,
};

/// Scoring method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Normalize,
    Saw,
    Ahp,
    ProfileMatching,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Normalize => "normalize",
            Method::Saw => "saw",
            Method::Ahp => "ahp",
            Method::ProfileMatching => "profile_matching",
        };
        write!(f, "{}", s)
    }
}

/// SAW criteria, either one entry per column or main criteria with sub-criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SawCriteria {
    Flat(Vec<CriterionSpec>),
    Grouped(Vec<CriterionGroup>),
}

impl SawCriteria {
    /// Resolves to one criterion per matrix column.
    pub fn columns(&self) -> Vec<CriterionSpec> {
        match self {
            SawCriteria::Flat(criteria) => criteria.clone(),
            SawCriteria::Grouped(groups) => SAWEngine::flatten_criteria(groups),
        }
    }
}

/// A Profile Matching criterion and the factor group it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCriterion {
    pub name: String,
    pub group: FactorGroup,
}

/// One evaluation, tagged by `method`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum EvaluationRequest {
    Normalize {
        criteria: Vec<String>,
        weights: Vec<f64>,
    },
    Saw {
        alternatives: Vec<String>,
        criteria: SawCriteria,
        matrix: DecisionMatrix,
    },
    Ahp {
        alternatives: Vec<String>,
        criteria: Vec<String>,
        criteria_matrix: PairwiseMatrix,
        alternative_matrices: Vec<PairwiseMatrix>,
    },
    ProfileMatching {
        alternatives: Vec<String>,
        criteria: Vec<ProfileCriterion>,
        ideal: Vec<f64>,
        matrix: DecisionMatrix,
        #[serde(default)]
        core_weight: Option<f64>,
    },
}

impl EvaluationRequest {
    pub fn method(&self) -> Method {
        match self {
            EvaluationRequest::Normalize { .. } => Method::Normalize,
            EvaluationRequest::Saw { .. } => Method::Saw,
            EvaluationRequest::Ahp { .. } => Method::Ahp,
            EvaluationRequest::ProfileMatching { .. } => Method::ProfileMatching,
        }
    }
}

/// A named numeric value (criterion weight, consistency ratio).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

impl NamedValue {
    fn zip(names: &[String], values: &[f64]) -> Vec<NamedValue> {
        names
            .iter()
            .zip(values)
            .map(|(name, value)| NamedValue {
                name: name.clone(),
                value: *value,
            })
            .collect()
    }
}

/// AHP consistency ratios of every matrix in the evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencySummary {
    pub criteria_ratio: f64,
    pub per_criterion: Vec<NamedValue>,
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique identifier for correlating logs with this report.
    pub evaluation_id: Uuid,
    pub method: Method,
    /// Ranked alternatives; empty for `normalize`.
    pub ranking: Vec<RankedAlternative>,
    /// Criterion weights the method actually used.
    pub weights: Vec<NamedValue>,
    /// Present for `ahp` only.
    pub consistency: Option<ConsistencySummary>,
    pub diagnostics: Vec<Diagnostic>,
    pub computed_at: DateTime<Utc>,
}

/// Handler that evaluates requests against a scoring configuration.
pub struct EvaluationHandler {
    config: ScoringConfig,
}

impl EvaluationHandler {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Evaluates a request.
    ///
    /// # Errors
    /// Returns the engine's `ScoringError` unchanged. Advisory conditions
    /// (weight sum, consistency) are reported as diagnostics instead.
    pub fn handle(&self, request: EvaluationRequest) -> Result<EvaluationReport, ScoringError> {
        let evaluation_id = Uuid::new_v4();
        let method = request.method();

        debug!(
            evaluation_id = %evaluation_id,
            method = %method,
            "Evaluating request"
        );

        let outcome = match request {
            EvaluationRequest::Normalize { criteria, weights } => {
                self.normalize(&criteria, &weights)?
            }
            EvaluationRequest::Saw {
                alternatives,
                criteria,
                matrix,
            } => self.saw(&alternatives, &criteria, &matrix)?,
            EvaluationRequest::Ahp {
                alternatives,
                criteria,
                criteria_matrix,
                alternative_matrices,
            } => self.ahp(&alternatives, &criteria, &criteria_matrix, &alternative_matrices)?,
            EvaluationRequest::ProfileMatching {
                alternatives,
                criteria,
                ideal,
                matrix,
                core_weight,
            } => self.profile_matching(&alternatives, &criteria, &ideal, &matrix, core_weight)?,
        };

        for diagnostic in &outcome.diagnostics {
            warn!(
                evaluation_id = %evaluation_id,
                method = %method,
                "{}",
                diagnostic
            );
        }

        debug!(
            evaluation_id = %evaluation_id,
            method = %method,
            alternatives = outcome.ranking.len(),
            best = outcome.ranking.first().map(|r| r.name.as_str()).unwrap_or(""),
            "Evaluation complete"
        );

        Ok(EvaluationReport {
            evaluation_id,
            method,
            ranking: outcome.ranking,
            weights: outcome.weights,
            consistency: outcome.consistency,
            diagnostics: outcome.diagnostics,
            computed_at: Utc::now(),
        })
    }

    fn normalize(&self, criteria: &[String], weights: &[f64]) -> Result<Outcome, ScoringError> {
        if criteria.len() != weights.len() {
            return Err(ScoringError::shape("weights", criteria.len(), weights.len()));
        }

        let normalized = WeightNormalizer::normalize(weights)?;

        Ok(Outcome {
            weights: NamedValue::zip(criteria, &normalized),
            ..Outcome::default()
        })
    }

    fn saw(
        &self,
        alternatives: &[String],
        criteria: &SawCriteria,
        matrix: &DecisionMatrix,
    ) -> Result<Outcome, ScoringError> {
        let mut columns = criteria.columns();
        let raw: Vec<f64> = columns.iter().map(|c| c.weight).collect();

        let diagnostics: Vec<Diagnostic> =
            Diagnostic::check_weights(&raw, self.config.weight_sum_tolerance)
                .into_iter()
                .collect();

        if self.config.normalize_saw_weights && !diagnostics.is_empty() {
            let normalized = WeightNormalizer::normalize(&raw)?;
            for (column, weight) in columns.iter_mut().zip(normalized) {
                column.weight = weight;
            }
        }

        let scores = SAWEngine::score_criteria(matrix, &columns)?;
        let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
        let weights: Vec<f64> = columns.iter().map(|c| c.weight).collect();

        Ok(Outcome {
            ranking: Ranking::rank(alternatives, &scores)?,
            weights: NamedValue::zip(&names, &weights),
            consistency: None,
            diagnostics,
        })
    }

    fn ahp(
        &self,
        alternatives: &[String],
        criteria: &[String],
        criteria_matrix: &PairwiseMatrix,
        alternative_matrices: &[PairwiseMatrix],
    ) -> Result<Outcome, ScoringError> {
        if criteria.len() != criteria_matrix.size() {
            return Err(ScoringError::shape(
                "criteria",
                criteria_matrix.size(),
                criteria.len(),
            ));
        }

        if self.config.verify_reciprocal {
            let tolerance = self.config.reciprocal_tolerance;
            criteria_matrix.check_reciprocal(tolerance)?;
            for matrix in alternative_matrices {
                matrix.check_reciprocal(tolerance)?;
            }
        }

        let outcome = AHPEngine::score(criteria_matrix, alternative_matrices)?;
        let diagnostics = Diagnostic::check_consistency(&outcome, self.config.consistency_threshold);

        Ok(Outcome {
            ranking: Ranking::rank(alternatives, &outcome.final_scores)?,
            weights: NamedValue::zip(criteria, &outcome.criteria_weights),
            consistency: Some(ConsistencySummary {
                criteria_ratio: outcome.criteria_consistency_ratio,
                per_criterion: NamedValue::zip(criteria, &outcome.alternative_consistency_ratios),
            }),
            diagnostics,
        })
    }

    fn profile_matching(
        &self,
        alternatives: &[String],
        criteria: &[ProfileCriterion],
        ideal: &[f64],
        matrix: &DecisionMatrix,
        core_weight: Option<f64>,
    ) -> Result<Outcome, ScoringError> {
        let core_weight = core_weight.unwrap_or(self.config.default_core_weight);
        let groups: Vec<FactorGroup> = criteria.iter().map(|c| c.group).collect();

        let scores = ProfileMatchingEngine::score_all(matrix, ideal, &groups, core_weight)?;

        Ok(Outcome {
            ranking: Ranking::rank(alternatives, &scores)?,
            weights: vec![
                NamedValue {
                    name: "core".to_string(),
                    value: core_weight,
                },
                NamedValue {
                    name: "secondary".to_string(),
                    value: 1.0 - core_weight,
                },
            ],
            consistency: None,
            diagnostics: Vec::new(),
        })
    }
}

/// Method-specific parts of a report.
#[derive(Debug, Default)]
struct Outcome {
    ranking: Vec<RankedAlternative>,
    weights: Vec<NamedValue>,
    consistency: Option<ConsistencySummary>,
    diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ComparisonScope;
    use crate::domain::foundation::CriterionKind;

    fn handler() -> EvaluationHandler {
        EvaluationHandler::new(ScoringConfig::default())
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn pairwise(rows: Vec<Vec<f64>>) -> PairwiseMatrix {
        PairwiseMatrix::new(rows).unwrap()
    }

    // Normalize

    #[test]
    fn normalize_reports_weights_without_ranking() {
        let report = handler()
            .handle(EvaluationRequest::Normalize {
                criteria: names(&["Price", "Quality"]),
                weights: vec![1.0, 3.0],
            })
            .unwrap();

        assert_eq!(report.method, Method::Normalize);
        assert!(report.ranking.is_empty());
        assert_eq!(report.weights[0].name, "Price");
        assert_eq!(report.weights[0].value, 0.25);
        assert_eq!(report.weights[1].value, 0.75);
    }

    #[test]
    fn normalize_zero_sum_fails() {
        let result = handler().handle(EvaluationRequest::Normalize {
            criteria: names(&["A", "B"]),
            weights: vec![0.0, 0.0],
        });
        assert_eq!(result.unwrap_err(), ScoringError::DivisionByZero);
    }

    #[test]
    fn normalize_name_count_mismatch() {
        let result = handler().handle(EvaluationRequest::Normalize {
            criteria: names(&["A"]),
            weights: vec![0.5, 0.5],
        });
        assert!(matches!(result, Err(ScoringError::ShapeMismatch { .. })));
    }

    // SAW

    fn saw_request(weights: [f64; 2]) -> EvaluationRequest {
        EvaluationRequest::Saw {
            alternatives: names(&["A", "B"]),
            criteria: SawCriteria::Flat(vec![
                CriterionSpec::benefit("Quality", weights[0]),
                CriterionSpec::cost("Price", weights[1]),
            ]),
            matrix: DecisionMatrix::new(vec![vec![1.0, 2.0], vec![3.0, 1.0]]).unwrap(),
        }
    }

    #[test]
    fn saw_ranks_alternatives() {
        let report = handler().handle(saw_request([0.5, 0.5])).unwrap();

        assert_eq!(report.ranking[0].name, "B");
        assert_eq!(report.ranking[0].rank, 1);
        assert!((report.ranking[0].score - 1.0).abs() < 1e-9);
        assert!((report.ranking[1].score - 0.4167).abs() < 1e-4);
        assert!(report.diagnostics.is_empty());
        assert!(report.consistency.is_none());
    }

    #[test]
    fn saw_warns_on_weight_sum_but_still_scores() {
        let report = handler().handle(saw_request([1.0, 1.0])).unwrap();

        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::WeightsDoNotSumToOne { sum: 2.0 }]
        );
        assert_eq!(report.weights[0].value, 1.0);
        assert!((report.ranking[0].score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn saw_normalizes_weights_when_configured() {
        let handler = EvaluationHandler::new(ScoringConfig {
            normalize_saw_weights: true,
            ..Default::default()
        });
        let report = handler.handle(saw_request([1.0, 1.0])).unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.weights[0].value, 0.5);
        assert!((report.ranking[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn saw_grouped_criteria_flatten_to_columns() {
        let request = EvaluationRequest::Saw {
            alternatives: names(&["A", "B"]),
            criteria: SawCriteria::Grouped(vec![CriterionGroup::new("Cost", 1.0)
                .with_sub(crate::domain::foundation::SubCriterion::new(
                    "Purchase",
                    CriterionKind::Cost,
                    1.0,
                ))
                .with_sub(crate::domain::foundation::SubCriterion::new(
                    "Upkeep",
                    CriterionKind::Cost,
                    1.0,
                ))]),
            matrix: DecisionMatrix::new(vec![vec![10.0, 4.0], vec![20.0, 2.0]]).unwrap(),
        };

        let report = handler().handle(request).unwrap();
        assert_eq!(report.weights[0].name, "Cost - Purchase");
        assert_eq!(report.weights[1].value, 0.5);
        // A: 0.5*1 + 0.5*0.5 = 0.75, B: 0.5*0.5 + 0.5*1 = 0.75 -> tie keeps input order
        assert_eq!(report.ranking[0].name, "A");
    }

    // AHP

    #[test]
    fn ahp_reports_weights_and_consistency() {
        let request = EvaluationRequest::Ahp {
            alternatives: names(&["X", "Y"]),
            criteria: names(&["Cost", "Comfort"]),
            criteria_matrix: pairwise(vec![vec![1.0, 3.0], vec![1.0 / 3.0, 1.0]]),
            alternative_matrices: vec![
                pairwise(vec![vec![1.0, 1.0], vec![1.0, 1.0]]),
                pairwise(vec![vec![1.0, 0.25], vec![4.0, 1.0]]),
            ],
        };

        let report = handler().handle(request).unwrap();

        assert_eq!(report.ranking[0].name, "Y");
        assert!((report.weights[0].value - 0.75).abs() < 1e-12);
        let consistency = report.consistency.unwrap();
        assert_eq!(consistency.criteria_ratio, 0.0);
        assert_eq!(consistency.per_criterion[1].name, "Comfort");
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn ahp_flags_inconsistent_alternative_matrix() {
        let cyclic = pairwise(vec![
            vec![1.0, 5.0, 0.2],
            vec![0.2, 1.0, 5.0],
            vec![5.0, 0.2, 1.0],
        ]);
        let request = EvaluationRequest::Ahp {
            alternatives: names(&["A", "B", "C"]),
            criteria: names(&["Only"]),
            criteria_matrix: pairwise(vec![vec![1.0]]),
            alternative_matrices: vec![cyclic],
        };

        let report = handler().handle(request).unwrap();
        assert_eq!(report.diagnostics.len(), 1);
        assert!(matches!(
            report.diagnostics[0],
            Diagnostic::InconsistentComparisons {
                scope: ComparisonScope::Alternatives { criterion: 0 },
                ..
            }
        ));
    }

    #[test]
    fn ahp_rejects_asymmetric_matrix() {
        let request = EvaluationRequest::Ahp {
            alternatives: names(&["A", "B"]),
            criteria: names(&["Only"]),
            criteria_matrix: pairwise(vec![vec![1.0]]),
            alternative_matrices: vec![pairwise(vec![vec![1.0, 3.0], vec![3.0, 1.0]])],
        };

        let result = handler().handle(request);
        assert!(matches!(result, Err(ScoringError::Asymmetry { .. })));
    }

    #[test]
    fn ahp_skips_reciprocal_check_when_disabled() {
        let handler = EvaluationHandler::new(ScoringConfig {
            verify_reciprocal: false,
            ..Default::default()
        });
        let request = EvaluationRequest::Ahp {
            alternatives: names(&["A", "B"]),
            criteria: names(&["Only"]),
            criteria_matrix: pairwise(vec![vec![1.0]]),
            alternative_matrices: vec![pairwise(vec![vec![1.0, 3.0], vec![3.0, 1.0]])],
        };

        assert!(handler.handle(request).is_ok());
    }

    #[test]
    fn ahp_criteria_names_must_match_matrix() {
        let request = EvaluationRequest::Ahp {
            alternatives: names(&["A", "B"]),
            criteria: names(&["One", "Two"]),
            criteria_matrix: pairwise(vec![vec![1.0]]),
            alternative_matrices: vec![pairwise(vec![vec![1.0, 1.0], vec![1.0, 1.0]])],
        };

        let result = handler().handle(request);
        assert!(matches!(result, Err(ScoringError::ShapeMismatch { .. })));
    }

    // Profile Matching

    fn profile_request(core_weight: Option<f64>) -> EvaluationRequest {
        EvaluationRequest::ProfileMatching {
            alternatives: names(&["Ann", "Bo"]),
            criteria: vec![
                ProfileCriterion {
                    name: "Skill".to_string(),
                    group: FactorGroup::Core,
                },
                ProfileCriterion {
                    name: "Attitude".to_string(),
                    group: FactorGroup::Secondary,
                },
            ],
            ideal: vec![4.0, 3.0],
            matrix: DecisionMatrix::new(vec![vec![4.0, 1.0], vec![2.0, 3.0]]).unwrap(),
            core_weight,
        }
    }

    #[test]
    fn profile_matching_uses_default_core_weight() {
        let report = handler().handle(profile_request(None)).unwrap();

        // Ann: 5.0*0.6 + 4.0*0.4 = 4.6, Bo: 4.0*0.6 + 5.0*0.4 = 4.4
        assert_eq!(report.ranking[0].name, "Ann");
        assert!((report.ranking[0].score - 4.6).abs() < 1e-9);
        assert!((report.ranking[1].score - 4.4).abs() < 1e-9);
        assert_eq!(report.weights[0].value, 0.6);
    }

    #[test]
    fn profile_matching_honours_request_core_weight() {
        let report = handler().handle(profile_request(Some(0.2))).unwrap();

        // Ann: 5.0*0.2 + 4.0*0.8 = 4.2, Bo: 4.0*0.2 + 5.0*0.8 = 4.8
        assert_eq!(report.ranking[0].name, "Bo");
    }

    // Serialization

    #[test]
    fn request_deserializes_by_method_tag() {
        let json = r#"{
            "method": "normalize",
            "criteria": ["A", "B"],
            "weights": [2, 2]
        }"#;
        let request: EvaluationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.method(), Method::Normalize);
    }

    #[test]
    fn report_serializes_method_in_snake_case() {
        let report = handler().handle(profile_request(None)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["method"], "profile_matching");
        assert!(json["evaluation_id"].is_string());
        assert!(json["consistency"].is_null());
    }
}
