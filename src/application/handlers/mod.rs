//! Application handlers.
//!
//! Handlers that validate requests and dispatch them to the scoring engines.

mod evaluate;

pub use evaluate::{
    // Handler
    EvaluationHandler,
    // Requests
    EvaluationRequest,
    Method,
    ProfileCriterion,
    SawCriteria,
    // Reports
    ConsistencySummary,
    EvaluationReport,
    NamedValue,
};
