//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and error types that form the vocabulary
//! of the scoring engine: criteria, matrices and scoring errors.

mod criterion;
mod errors;
mod matrix;

pub use criterion::{CriterionGroup, CriterionKind, CriterionSpec, FactorGroup, SubCriterion};
pub use errors::{ErrorCode, ScoringError};
pub use matrix::{DecisionMatrix, PairwiseMatrix};
