//! One-to-one vertex matching derived from a finished similarity matrix.

use crate::error::AssignmentError;
use crate::{ScoreNorm, SimilarityMatrix};
use closed01::Closed01;
use munkres::{solve_assignment, WeightMatrix};

impl<V: Ord + Clone> SimilarityMatrix<V> {
    /// Matches outer keys to inner keys so that the sum of matched scores is
    /// maximal (Hungarian method). The smaller side is padded with dummy
    /// vertices of score 0; matches with a dummy are not reported. Pairs
    /// missing from the matrix count as 0.
    pub fn optimal_assignment(&self) -> Result<Vec<(V, V, f64)>, AssignmentError> {
        let rows: Vec<&V> = self.outer_keys().collect();
        let cols = self.inner_keys();
        let n = rows.len().max(cols.len());
        if rows.is_empty() || cols.is_empty() {
            return Ok(Vec::new());
        }

        let score = |i: usize, j: usize| -> f64 {
            if i < rows.len() && j < cols.len() {
                self.get_ordered(rows[i], cols[j]).unwrap_or(0.0)
            } else {
                0.0
            }
        };
        let max = self.max_score().unwrap_or(0.0).max(0.0);

        // munkres minimizes, so turn scores into costs.
        let mut weights = WeightMatrix::from_fn(n, |(i, j)| max - score(i, j));
        let positions = solve_assignment(&mut weights).map_err(AssignmentError::Unsolvable)?;

        Ok(positions
            .into_iter()
            .filter(|pos| pos.row < rows.len() && pos.column < cols.len())
            .map(|pos| {
                (
                    rows[pos.row].clone(),
                    cols[pos.column].clone(),
                    score(pos.row, pos.column),
                )
            })
            .collect())
    }

    /// Sum of the optimally matched scores, normalized by the number of
    /// outer or inner keys. An empty matrix scores 0.
    pub fn matching_score(&self, norm: ScoreNorm) -> Result<Closed01<f64>, AssignmentError> {
        let assignment = self.optimal_assignment()?;
        let (n_rows, n_cols) = (self.outer_keys().count(), self.inner_keys().len());
        let n = match norm {
            ScoreNorm::MinSize => n_rows.min(n_cols),
            ScoreNorm::MaxSize => n_rows.max(n_cols),
        };
        if n == 0 {
            return Ok(Closed01::zero());
        }
        let sum: f64 = assignment.iter().map(|&(_, _, s)| s).sum();
        Ok(Closed01::new((sum / n as f64).max(0.0).min(1.0)))
    }
}
