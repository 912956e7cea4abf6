//! Analysis Module - Pure scoring engines for multi-criteria decisions.
//!
//! This module contains stateless functions that turn decision matrices,
//! pairwise comparisons and weights into scores and rankings.
//!
//! # Components
//!
//! - `WeightNormalizer` - Rescales weights to sum to one
//! - `SAWEngine` - Simple Additive Weighting with benefit/cost normalization
//! - `AHPEngine` - Analytic Hierarchy Process with consistency ratios
//! - `ProfileMatchingEngine` - Gap analysis against an ideal profile
//! - `Ranking` - Descending order with stable ties
//! - `Diagnostic` - Advisory warnings (weight sum, consistency)
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take
//! validated inputs and return computed results or a `ScoringError`.

mod ahp;
mod diagnostics;
mod profile_matching;
mod ranking;
mod saw;
mod weight_normalizer;

// Re-export all public types
pub use ahp::{AHPEngine, AHPOutcome, ConsistencyResult, CONSISTENCY_THRESHOLD};
pub use diagnostics::{ComparisonScope, Diagnostic};
pub use profile_matching::{ProfileMatchingEngine, MAX_GAP};
pub use ranking::{RankedAlternative, Ranking};
pub use saw::SAWEngine;
pub use weight_normalizer::{WeightNormalizer, WEIGHT_SUM_TOLERANCE};
