//! Criterion value objects: direction, weight and grouping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction in which a criterion's raw values are preferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionKind {
    /// Higher raw value is better.
    #[default]
    Benefit,
    /// Lower raw value is better.
    Cost,
}

impl CriterionKind {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            CriterionKind::Benefit => "Benefit",
            CriterionKind::Cost => "Cost",
        }
    }

    /// Returns true if higher values are preferred.
    pub fn is_benefit(&self) -> bool {
        matches!(self, CriterionKind::Benefit)
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single scored column: name, direction and weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub name: String,
    pub kind: CriterionKind,
    pub weight: f64,
}

impl CriterionSpec {
    /// Creates a new criterion.
    pub fn new(name: impl Into<String>, kind: CriterionKind, weight: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            weight,
        }
    }

    /// Creates a benefit criterion.
    pub fn benefit(name: impl Into<String>, weight: f64) -> Self {
        Self::new(name, CriterionKind::Benefit, weight)
    }

    /// Creates a cost criterion.
    pub fn cost(name: impl Into<String>, weight: f64) -> Self {
        Self::new(name, CriterionKind::Cost, weight)
    }
}

/// A sub-criterion nested under a main criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCriterion {
    pub name: String,
    pub kind: CriterionKind,
    /// Weight relative to its siblings.
    pub weight: f64,
}

impl SubCriterion {
    pub fn new(name: impl Into<String>, kind: CriterionKind, weight: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            weight,
        }
    }
}

/// A main criterion whose weight is shared among its sub-criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionGroup {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub sub_criteria: Vec<SubCriterion>,
}

impl CriterionGroup {
    /// Creates a group with no sub-criteria yet.
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            sub_criteria: Vec::new(),
        }
    }

    /// Adds a sub-criterion.
    pub fn with_sub(mut self, sub: SubCriterion) -> Self {
        self.sub_criteria.push(sub);
        self
    }
}

/// Profile Matching factor group a criterion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorGroup {
    Core,
    Secondary,
}

impl FactorGroup {
    /// Splits per-criterion tags into disjoint (core, secondary) index sets.
    pub fn partition(groups: &[FactorGroup]) -> (Vec<usize>, Vec<usize>) {
        let mut core = Vec::new();
        let mut secondary = Vec::new();
        for (index, group) in groups.iter().enumerate() {
            match group {
                FactorGroup::Core => core.push(index),
                FactorGroup::Secondary => secondary.push(index),
            }
        }
        (core, secondary)
    }
}
