//! MCDA Engine - Multi-criteria decision analysis scoring
//!
//! This crate scores and ranks alternatives with Simple Additive Weighting,
//! the Analytic Hierarchy Process, and Profile Matching, and exposes a
//! JSON-driven handler plus a command-line binary around them.

pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
