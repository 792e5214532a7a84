use approx::{AbsDiffEq, RelativeEq};
use ndarray::Array2;
use std::collections::{BTreeMap, BTreeSet};

/// Maps vertex pairs to similarity scores.
///
/// Pairs are stored as outer key -> inner key -> score. For the dual-graph
/// algorithms the outer key is a vertex of the first graph and the inner key
/// a vertex of the second graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix<V: Ord> {
    scores: BTreeMap<V, BTreeMap<V, f64>>,
}

impl<V: Ord> Default for SimilarityMatrix<V> {
    fn default() -> Self {
        SimilarityMatrix::new()
    }
}

impl<V: Ord> SimilarityMatrix<V> {
    pub fn new() -> SimilarityMatrix<V> {
        SimilarityMatrix {
            scores: BTreeMap::new(),
        }
    }

    /// Overwrites silently.
    pub fn set(&mut self, outer: V, inner: V, score: f64) {
        self.scores
            .entry(outer)
            .or_insert_with(BTreeMap::new)
            .insert(inner, score);
    }

    /// Looks up the score of a pair, trying `(a, b)` first and `(b, a)`
    /// second. Returns `None` if neither ordering is stored.
    pub fn get(&self, a: &V, b: &V) -> Option<f64> {
        self.get_ordered(a, b).or_else(|| self.get_ordered(b, a))
    }

    /// Looks up `(outer, inner)` without falling back to the swapped pair.
    pub fn get_ordered(&self, outer: &V, inner: &V) -> Option<f64> {
        self.scores.get(outer).and_then(|row| row.get(inner)).cloned()
    }

    pub fn contains(&self, a: &V, b: &V) -> bool {
        self.get(a, b).is_some()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.scores.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_score(&self) -> Option<f64> {
        self.iter()
            .map(|(_, _, s)| s)
            .fold(None, |max, s| match max {
                Some(m) if m >= s => Some(m),
                _ => Some(s),
            })
    }

    pub fn outer_keys(&self) -> impl Iterator<Item = &V> {
        self.scores.keys()
    }

    /// Distinct inner keys over all rows, in ascending order.
    pub fn inner_keys(&self) -> Vec<&V> {
        let keys: BTreeSet<&V> = self.scores.values().flat_map(|row| row.keys()).collect();
        keys.into_iter().collect()
    }

    /// Enumerates `(outer, inner, score)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &V, f64)> {
        self.scores
            .iter()
            .flat_map(|(outer, row)| row.iter().map(move |(inner, &s)| (outer, inner, s)))
    }

    pub fn for_each_pair<F>(&self, mut visitor: F)
    where
        F: FnMut(&V, &V, f64),
    {
        for (outer, inner, s) in self.iter() {
            visitor(outer, inner, s);
        }
    }
}

impl<V: Ord + Clone> SimilarityMatrix<V> {
    /// Publishes a dense score matrix, `rows[i]` and `cols[j]` naming entry
    /// `(i, j)`.
    pub fn from_dense(rows: &[V], cols: &[V], scores: &Array2<f64>) -> SimilarityMatrix<V> {
        assert_eq!(scores.dim(), (rows.len(), cols.len()));
        let mut matrix = SimilarityMatrix::new();
        for ((i, j), &s) in scores.indexed_iter() {
            matrix.set(rows[i].clone(), cols[j].clone(), s);
        }
        matrix
    }

    pub fn to_vec(&self) -> Vec<(V, V, f64)> {
        self.iter()
            .map(|(outer, inner, s)| (outer.clone(), inner.clone(), s))
            .collect()
    }
}

impl<V: Ord> AbsDiffEq for SimilarityMatrix<V> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.len() == other.len()
            && self.iter().all(|(a, b, s)| {
                other
                    .get_ordered(a, b)
                    .map_or(false, |o| s.abs_diff_eq(&o, epsilon))
            })
    }
}

impl<V: Ord> RelativeEq for SimilarityMatrix<V> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.len() == other.len()
            && self.iter().all(|(a, b, s)| {
                other
                    .get_ordered(a, b)
                    .map_or(false, |o| s.relative_eq(&o, epsilon, max_relative))
            })
    }
}
