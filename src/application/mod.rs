//! Application layer - Request handlers.
//!
//! This layer orchestrates domain scoring operations, applies configured
//! thresholds, and turns engine output into reports.

pub mod handlers;

pub use handlers::{
    ConsistencySummary, EvaluationHandler, EvaluationReport, EvaluationRequest, Method,
    NamedValue, ProfileCriterion, SawCriteria,
};
