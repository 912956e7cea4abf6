//! Domain layer containing the scoring engine and its vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (criteria, matrices, errors)
//! - `analysis` - Pure scoring engines (SAW, AHP, Profile Matching, ranking)

pub mod analysis;
pub mod foundation;
