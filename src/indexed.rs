use crate::graph_traits::GraphView;
use std::collections::HashMap;

/// Dense index snapshot of a [`GraphView`], taken once per calculation so
/// that the sweeps only touch integer indices.
#[derive(Debug)]
pub(crate) struct IndexedGraph<V, L> {
    pub vertices: Vec<V>,
    /// Predecessor indices per vertex, ascending and without duplicates.
    pub predecessors: Vec<Vec<usize>>,
    /// `(source, target, label)` per edge.
    pub edges: Vec<(usize, usize, L)>,
    index: HashMap<V, usize>,
}

impl<V, L> IndexedGraph<V, L>
where
    V: Clone + Eq + std::hash::Hash,
{
    pub fn new<G>(graph: &G) -> IndexedGraph<V, L>
    where
        G: GraphView<Vertex = V, Label = L>,
    {
        let vertices = graph.vertices();
        let index: HashMap<V, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();

        let predecessors = vertices
            .iter()
            .map(|v| {
                let mut preds: Vec<usize> = graph
                    .predecessors(v)
                    .iter()
                    .filter_map(|p| index.get(p).cloned())
                    .collect();
                preds.sort_unstable();
                preds.dedup();
                preds
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .filter_map(|e| match (index.get(&e.source), index.get(&e.target)) {
                (Some(&s), Some(&t)) => Some((s, t, e.label)),
                _ => None,
            })
            .collect();

        IndexedGraph {
            vertices,
            predecessors,
            edges,
            index,
        }
    }

    pub fn index_of(&self, v: &V) -> Option<usize> {
        self.index.get(v).cloned()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}
