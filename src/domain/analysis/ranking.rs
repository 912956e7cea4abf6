//! Ranking - Orders scored alternatives best first.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ScoringError;

/// One row of a ranked result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// 1-based position, 1 = highest score.
    pub rank: usize,
    pub name: String,
    pub score: f64,
}

/// Ranking functions.
pub struct Ranking;

impl Ranking {
    /// Sorts alternatives by descending score and numbers them from 1.
    ///
    /// Ties keep their input order and still receive distinct ranks.
    pub fn rank<S: AsRef<str>>(
        names: &[S],
        scores: &[f64],
    ) -> Result<Vec<RankedAlternative>, ScoringError> {
        if names.len() != scores.len() {
            return Err(ScoringError::shape("scores", names.len(), scores.len()));
        }

        let mut order: Vec<usize> = (0..scores.len()).collect();
        // Vec::sort_by is stable
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        Ok(order
            .into_iter()
            .enumerate()
            .map(|(position, index)| RankedAlternative {
                rank: position + 1,
                name: names[index].as_ref().to_string(),
                score: scores[index],
            })
            .collect())
    }

    /// Returns the top-ranked alternative, if any.
    pub fn best(ranked: &[RankedAlternative]) -> Option<&RankedAlternative> {
        ranked.first()
    }
}
