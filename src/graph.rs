use crate::graph_traits::{Edge, GraphView};
use petgraph::graph::Graph as PetGraph;
use petgraph::EdgeType;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct EdgeEntry<L> {
    /// Node index type. Our graphs never exceed 4 billion nodes.
    source: u32,
    target: u32,
    label: L,
}

#[derive(Debug, Clone)]
struct Node<V> {
    // indices into `LabeledGraph::edges`
    in_edges: Vec<usize>,
    out_edges: Vec<usize>,
    value: V,
}

impl<V> Node<V> {
    fn new(value: V) -> Node<V> {
        Node {
            in_edges: Vec::new(),
            out_edges: Vec::new(),
            value,
        }
    }
}

/// An adjacency-list graph with labeled edges.
///
/// Whether the graph is directed and whether it admits parallel edges is fixed
/// at construction. In a graph without multi-edge support, adding an edge
/// between an already connected pair replaces the label of the existing edge.
#[derive(Debug, Clone)]
pub struct LabeledGraph<V, L = ()> {
    directed: bool,
    multiedged: bool,
    nodes: Vec<Node<V>>,
    edges: Vec<EdgeEntry<L>>,
    // maps vertex to index in `nodes`.
    node_map: BTreeMap<V, usize>,
}

impl<V, L> LabeledGraph<V, L>
where
    V: Clone + Ord + Hash + Debug,
    L: Clone + Eq + Hash + Debug,
{
    pub fn new(directed: bool, multiedged: bool) -> LabeledGraph<V, L> {
        LabeledGraph {
            directed,
            multiedged,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_map: BTreeMap::new(),
        }
    }

    pub fn new_directed() -> LabeledGraph<V, L> {
        Self::new(true, false)
    }

    pub fn new_undirected() -> LabeledGraph<V, L> {
        Self::new(false, false)
    }

    /// A directed graph that keeps every added edge, including parallel ones.
    pub fn new_multiedged() -> LabeledGraph<V, L> {
        Self::new(true, true)
    }

    /// Builds a graph from a petgraph graph whose node weights are the vertex
    /// identifiers and whose edge weights are the labels. Nodes carrying the
    /// same weight collapse into one vertex.
    pub fn from_petgraph<Ty: EdgeType>(pg: &PetGraph<V, L, Ty>, multiedged: bool) -> LabeledGraph<V, L> {
        let mut graph = LabeledGraph::new(pg.is_directed(), multiedged);
        for i in pg.node_indices() {
            graph.add_vertex(pg[i].clone());
        }
        for e in pg.raw_edges() {
            graph.add_edge(
                pg[e.source()].clone(),
                pg[e.target()].clone(),
                e.weight.clone(),
            );
        }
        graph
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, v: &V) -> bool {
        self.node_map.contains_key(v)
    }

    /// Adds `v` unless present. Returns the node index either way.
    pub fn add_vertex(&mut self, v: V) -> usize {
        match self.node_map.entry(v) {
            Entry::Vacant(e) => {
                let idx = self.nodes.len();
                self.nodes.push(Node::new(e.key().clone()));
                e.insert(idx);
                idx
            }
            Entry::Occupied(e) => *e.get(),
        }
    }

    /// Adds an edge, creating missing endpoints. Returns the edge index.
    pub fn add_edge(&mut self, source: V, target: V, label: L) -> usize {
        let source_index = self.add_vertex(source);
        let target_index = self.add_vertex(target);
        assert!(source_index <= u32::max_value() as usize);
        assert!(target_index <= u32::max_value() as usize);

        if !self.multiedged {
            if let Some(existing) = self.find_edge(source_index, target_index) {
                self.edges[existing].label = label;
                return existing;
            }
        }

        let edge_index = self.edges.len();
        self.edges.push(EdgeEntry {
            source: source_index as u32,
            target: target_index as u32,
            label,
        });
        self.nodes[source_index].out_edges.push(edge_index);
        self.nodes[target_index].in_edges.push(edge_index);
        edge_index
    }

    fn find_edge(&self, source_index: usize, target_index: usize) -> Option<usize> {
        let forward = self.nodes[source_index]
            .out_edges
            .iter()
            .cloned()
            .find(|&e| self.edges[e].target as usize == target_index);
        if forward.is_some() || self.directed {
            return forward;
        }
        self.nodes[target_index]
            .out_edges
            .iter()
            .cloned()
            .find(|&e| self.edges[e].target as usize == source_index)
    }

    fn incoming(&self, node_idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[node_idx]
            .in_edges
            .iter()
            .map(move |&e| self.edges[e].source as usize)
    }

    fn outgoing(&self, node_idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[node_idx]
            .out_edges
            .iter()
            .map(move |&e| self.edges[e].target as usize)
    }

    fn unique_values(&self, indices: impl Iterator<Item = usize>) -> Vec<V> {
        let mut seen = vec![false; self.nodes.len()];
        let mut values = Vec::new();
        for idx in indices {
            if !seen[idx] {
                seen[idx] = true;
                values.push(self.nodes[idx].value.clone());
            }
        }
        values
    }

    fn neighbors(&self, v: &V, forward: bool) -> Vec<V> {
        let node_idx = match self.node_map.get(v) {
            Some(&idx) => idx,
            None => return Vec::new(),
        };
        if !self.directed {
            return self.unique_values(self.incoming(node_idx).chain(self.outgoing(node_idx)));
        }
        if forward {
            self.unique_values(self.outgoing(node_idx))
        } else {
            self.unique_values(self.incoming(node_idx))
        }
    }
}

impl<V, L> GraphView for LabeledGraph<V, L>
where
    V: Clone + Ord + Hash + Debug,
    L: Clone + Eq + Hash + Debug,
{
    type Vertex = V;
    type Label = L;

    fn vertices(&self) -> Vec<V> {
        self.nodes.iter().map(|n| n.value.clone()).collect()
    }

    fn edges(&self) -> Vec<Edge<V, L>> {
        self.edges
            .iter()
            .map(|e| {
                Edge::new(
                    self.nodes[e.source as usize].value.clone(),
                    self.nodes[e.target as usize].value.clone(),
                    e.label.clone(),
                )
            })
            .collect()
    }

    fn predecessors(&self, v: &V) -> Vec<V> {
        self.neighbors(v, false)
    }

    fn successors(&self, v: &V) -> Vec<V> {
        self.neighbors(v, true)
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn is_multiedged(&self) -> bool {
        self.multiedged
    }

    #[inline]
    fn num_vertices(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predecessors_are_unique() {
        let mut g: LabeledGraph<&str, &str> = LabeledGraph::new_multiedged();
        g.add_edge("a", "b", "x");
        g.add_edge("a", "b", "y");
        g.add_edge("c", "b", "x");

        assert_eq!(3, g.num_edges());
        assert_eq!(vec!["a", "c"], g.predecessors(&"b"));
        assert_eq!(vec!["b"], g.successors(&"a"));
        assert!(g.predecessors(&"a").is_empty());
        assert!(g.predecessors(&"unknown").is_empty());
    }

    #[test]
    fn test_simple_graph_replaces_label() {
        let mut g: LabeledGraph<u32, &str> = LabeledGraph::new_directed();
        let e1 = g.add_edge(1, 2, "x");
        let e2 = g.add_edge(1, 2, "y");
        assert_eq!(e1, e2);
        assert_eq!(1, g.num_edges());
        assert_eq!(vec![Edge::new(1, 2, "y")], g.edges());

        // the reverse direction is a different edge
        g.add_edge(2, 1, "z");
        assert_eq!(2, g.num_edges());
    }

    #[test]
    fn test_undirected_neighbors() {
        let mut g: LabeledGraph<u32> = LabeledGraph::new_undirected();
        g.add_edge(1, 2, ());
        g.add_edge(3, 1, ());
        g.add_edge(2, 1, ());

        assert!(!g.is_directed());
        assert_eq!(2, g.num_edges());
        assert_eq!(vec![3, 2], g.predecessors(&1));
        assert_eq!(g.predecessors(&1), g.successors(&1));
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut g: LabeledGraph<&str> = LabeledGraph::new_directed();
        assert_eq!(0, g.add_vertex("a"));
        assert_eq!(1, g.add_vertex("b"));
        assert_eq!(0, g.add_vertex("a"));
        assert_eq!(2, g.len());
        assert_eq!(vec!["a", "b"], g.vertices());
    }

    #[test]
    fn test_from_petgraph() {
        let mut pg = PetGraph::<&str, &str>::new();
        let a = pg.add_node("a");
        let b = pg.add_node("b");
        pg.add_edge(a, b, "l");
        pg.add_edge(a, b, "l");

        let g = LabeledGraph::from_petgraph(&pg, true);
        assert!(g.is_directed());
        assert!(g.is_multiedged());
        assert_eq!(2, g.num_edges());
        assert_eq!(2, g.edges_by_label(&"l").len());

        let g = LabeledGraph::from_petgraph(&pg, false);
        assert_eq!(1, g.num_edges());
    }
}
