//! Error types for the scoring engine.

use std::fmt;
use thiserror::Error;

/// Errors raised by the scoring engine when its inputs are invalid.
///
/// Every variant describes a caller-side defect. None of them is transient,
/// so callers should surface them rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Weights sum to zero, cannot normalize")]
    DivisionByZero,

    #[error("Column {column} has a zero denominator ({kind} criterion)")]
    DegenerateColumn { column: usize, kind: &'static str },

    #[error("Pairwise matrix is degenerate at index {index}")]
    DegenerateMatrix { index: usize },

    #[error("Shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Pairwise matrix is not reciprocal at ({row}, {column}): {value} vs mirror {mirror}")]
    Asymmetry {
        row: usize,
        column: usize,
        value: f64,
        mirror: f64,
    },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },
}

impl ScoringError {
    /// Creates a shape mismatch error.
    pub fn shape(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        ScoringError::ShapeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// Creates an out of range error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ScoringError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ScoringError::DivisionByZero => ErrorCode::DivisionByZero,
            ScoringError::DegenerateColumn { .. } => ErrorCode::DegenerateColumn,
            ScoringError::DegenerateMatrix { .. } => ErrorCode::DegenerateMatrix,
            ScoringError::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            ScoringError::Asymmetry { .. } => ErrorCode::Asymmetry,
            ScoringError::OutOfRange { .. } => ErrorCode::OutOfRange,
        }
    }
}

/// Error codes exposed to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DivisionByZero,
    DegenerateColumn,
    DegenerateMatrix,
    ShapeMismatch,
    Asymmetry,
    OutOfRange,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::DivisionByZero => "DIVISION_BY_ZERO",
            ErrorCode::DegenerateColumn => "DEGENERATE_COLUMN",
            ErrorCode::DegenerateMatrix => "DEGENERATE_MATRIX",
            ErrorCode::ShapeMismatch => "SHAPE_MISMATCH",
            ErrorCode::Asymmetry => "ASYMMETRY",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
        };
        write!(f, "{}", s)
    }
}
