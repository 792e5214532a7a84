//! Traits that represent an abstract graph upon which the algorithms operate.

use std::fmt::Debug;
use std::hash::Hash;

/// A directed (source, target) pair carrying a label.
///
/// Graphs without edge labels use `()` as label type. SimilarityFlooding only
/// couples edges of the two input graphs whose labels compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<V, L> {
    pub source: V,
    pub target: V,
    pub label: L,
}

impl<V, L> Edge<V, L> {
    pub fn new(source: V, target: V, label: L) -> Edge<V, L> {
        Edge {
            source,
            target,
            label,
        }
    }
}

/// Read-only adjacency view of a graph. Used by the algorithms.
///
/// Vertices are opaque identifiers compared by value. `predecessors` and
/// `successors` return each adjacent vertex once, even if it is connected by
/// several parallel edges. For undirected graphs both return the neighbors.
pub trait GraphView {
    type Vertex: Clone + Ord + Hash + Debug;
    type Label: Clone + Eq + Hash + Debug;

    fn vertices(&self) -> Vec<Self::Vertex>;
    fn edges(&self) -> Vec<Edge<Self::Vertex, Self::Label>>;
    fn predecessors(&self, v: &Self::Vertex) -> Vec<Self::Vertex>;
    fn successors(&self, v: &Self::Vertex) -> Vec<Self::Vertex>;
    fn is_directed(&self) -> bool;
    fn is_multiedged(&self) -> bool;

    fn num_vertices(&self) -> usize {
        self.vertices().len()
    }

    /// All edges carrying `label`.
    fn edges_by_label(&self, label: &Self::Label) -> Vec<Edge<Self::Vertex, Self::Label>> {
        self.edges()
            .into_iter()
            .filter(|e| &e.label == label)
            .collect()
    }
}
