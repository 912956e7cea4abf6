//! Decision and pairwise comparison matrices.

use serde::{Deserialize, Serialize};

use super::ScoringError;

/// An `m × n` grid of criterion values: rows are alternatives, columns are criteria.
///
/// Construction guarantees at least two rows, at least one column and equal
/// row lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DecisionMatrix {
    rows: Vec<Vec<f64>>,
    columns: usize,
}

impl DecisionMatrix {
    /// Minimum number of alternatives a decision needs.
    pub const MIN_ROWS: usize = 2;

    /// Creates a matrix, validating its shape.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ScoringError> {
        if rows.len() < Self::MIN_ROWS {
            return Err(ScoringError::shape("alternatives", Self::MIN_ROWS, rows.len()));
        }

        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(ScoringError::shape("criteria", 1, 0));
        }

        if let Some(ragged) = rows.iter().find(|row| row.len() != columns) {
            return Err(ScoringError::shape("row length", columns, ragged.len()));
        }

        Ok(Self { rows, columns })
    }

    /// Number of alternatives.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of criteria.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Iterates the values of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index).copied())
    }
}

impl TryFrom<Vec<Vec<f64>>> for DecisionMatrix {
    type Error = ScoringError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<DecisionMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DecisionMatrix) -> Self {
        matrix.rows
    }
}

/// A square `k × k` matrix of pairwise preference ratios.
///
/// Entry `(i, j)` says how strongly item `i` is preferred over item `j`.
/// A well-formed matrix has a unit diagonal and `(j, i) = 1 / (i, j)`; that
/// invariant is only enforced by [`PairwiseMatrix::reciprocal`] and
/// [`PairwiseMatrix::from_upper_triangle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PairwiseMatrix {
    entries: Vec<Vec<f64>>,
}

impl PairwiseMatrix {
    /// Creates a matrix, checking only that it is non-empty and square.
    pub fn new(entries: Vec<Vec<f64>>) -> Result<Self, ScoringError> {
        let size = entries.len();
        if size == 0 {
            return Err(ScoringError::shape("pairwise matrix size", 1, 0));
        }
        if let Some(row) = entries.iter().find(|row| row.len() != size) {
            return Err(ScoringError::shape("pairwise row length", size, row.len()));
        }
        Ok(Self { entries })
    }

    /// Creates a matrix and verifies the reciprocal invariant within `tolerance`.
    pub fn reciprocal(entries: Vec<Vec<f64>>, tolerance: f64) -> Result<Self, ScoringError> {
        let matrix = Self::new(entries)?;
        matrix.check_reciprocal(tolerance)?;
        Ok(matrix)
    }

    /// Builds a reciprocal matrix from the judgments above the diagonal.
    ///
    /// `upper[i]` holds the entries `(i, i+1) .. (i, k-1)`; the diagonal is 1
    /// and each lower entry is the inverse of its mirror.
    pub fn from_upper_triangle(size: usize, upper: &[Vec<f64>]) -> Result<Self, ScoringError> {
        if size == 0 {
            return Err(ScoringError::shape("pairwise matrix size", 1, 0));
        }
        if upper.len() + 1 < size {
            return Err(ScoringError::shape("upper triangle rows", size - 1, upper.len()));
        }

        let mut entries = vec![vec![1.0; size]; size];
        for i in 0..size {
            let expected = size - i - 1;
            let judgments = upper.get(i).map(Vec::as_slice).unwrap_or(&[]);
            if judgments.len() != expected {
                return Err(ScoringError::shape(
                    format!("upper triangle row {}", i),
                    expected,
                    judgments.len(),
                ));
            }
            for (offset, &value) in judgments.iter().enumerate() {
                let j = i + 1 + offset;
                if value == 0.0 {
                    return Err(ScoringError::DegenerateMatrix { index: j });
                }
                entries[i][j] = value;
                entries[j][i] = 1.0 / value;
            }
        }

        Ok(Self { entries })
    }

    /// Verifies a unit diagonal and `(j, i) * (i, j) = 1` within `tolerance`.
    pub fn check_reciprocal(&self, tolerance: f64) -> Result<(), ScoringError> {
        for (i, row) in self.entries.iter().enumerate() {
            for (j, &value) in row.iter().enumerate().skip(i) {
                let mirror = self.entries[j][i];
                let consistent = if i == j {
                    (value - 1.0).abs() <= tolerance
                } else {
                    (value * mirror - 1.0).abs() <= tolerance
                };
                if !consistent {
                    return Err(ScoringError::Asymmetry {
                        row: i,
                        column: j,
                        value,
                        mirror,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of compared items.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.entries
    }

    /// Sum of every column.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.size()];
        for row in &self.entries {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums
    }

    /// Matrix-vector product `A · v`. `vector` must have `size()` entries.
    pub fn multiply(&self, vector: &[f64]) -> Vec<f64> {
        self.entries
            .iter()
            .map(|row| row.iter().zip(vector).map(|(a, b)| a * b).sum())
            .collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for PairwiseMatrix {
    type Error = ScoringError;

    fn try_from(entries: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<PairwiseMatrix> for Vec<Vec<f64>> {
    fn from(matrix: PairwiseMatrix) -> Self {
        matrix.entries
    }
}
