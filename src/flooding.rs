//! Similarity Flooding according to [this paper][1].
//!
//! Vertex pairs `(a, b)` of the two input graphs form the nodes of a pairwise
//! connectivity graph: `(a1, b1) -l-> (a2, b2)` whenever `a1 -l-> a2` and
//! `b1 -l-> b2` carry the same label. Scores flow along these edges in both
//! directions, weighted by propagation coefficients, until a fixpoint is
//! reached.
//!
//! [1]: https://doi.org/10.1109/ICDE.2002.994702 "2002, Sergey Melnik, Hector
//!      Garcia-Molina and Erhard Rahm, Similarity Flooding: A Versatile Graph
//!      Matching Algorithm and its Application to Schema Matching"

use crate::algorithm::{require_graphs, SimilarityAlgorithm};
use crate::error::Result;
use crate::graph_traits::GraphView;
use crate::indexed::IndexedGraph;
use crate::iteration::{iterate, l2_distance, IterationConfig};
use crate::{AlgorithmKind, SimilarityMatrix};
use log::{info, trace};
use ndarray::Array2;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// How each sweep combines the initial scores σ0, the previous scores σ and
/// the propagation step φ. Every variant normalizes by the maximum score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixpointFormula {
    /// σ' = σ + φ(σ)
    Basic,
    /// σ' = σ0 + φ(σ)
    A,
    /// σ' = φ(σ0 + σ)
    B,
    /// σ' = σ0 + σ + φ(σ0 + σ)
    C,
}

impl Default for FixpointFormula {
    fn default() -> Self {
        FixpointFormula::C
    }
}

/// Weight of a propagation edge, derived from how many equally labeled edges
/// leave (forward) or enter (backward) the two endpoints in their graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationCoefficient {
    /// `1 / (n_a * n_b)`
    InverseProduct,
    /// `2 / (n_a + n_b)`
    InverseAverage,
}

impl Default for PropagationCoefficient {
    fn default() -> Self {
        PropagationCoefficient::InverseProduct
    }
}

impl PropagationCoefficient {
    fn weight(self, n_a: usize, n_b: usize) -> f64 {
        let (n_a, n_b) = (n_a.max(1) as f64, n_b.max(1) as f64);
        match self {
            PropagationCoefficient::InverseProduct => 1.0 / (n_a * n_b),
            PropagationCoefficient::InverseAverage => 2.0 / (n_a + n_b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloodingConfig {
    pub formula: FixpointFormula,
    pub coefficient: PropagationCoefficient,
}

/// Similarity Flooding between two directed, multi-edged graphs.
#[derive(Debug)]
pub struct SimilarityFlooding<'g, G: GraphView> {
    a: &'g G,
    b: &'g G,
    flooding: FloodingConfig,
    config: IterationConfig,
    result: Option<SimilarityMatrix<G::Vertex>>,
    iterations: usize,
}

impl<'g, G: GraphView> SimilarityFlooding<'g, G> {
    /// Exactly two directed, multi-edged graphs.
    pub fn validate(graphs: &[&G]) -> Result<()> {
        require_graphs(AlgorithmKind::SimilarityFlooding, graphs, 2, true)
    }

    pub fn new(a: &'g G, b: &'g G) -> Result<Self> {
        Self::validate(&[a, b])?;
        Ok(SimilarityFlooding {
            a,
            b,
            flooding: FloodingConfig::default(),
            config: IterationConfig::default(),
            result: None,
            iterations: 0,
        })
    }

    pub fn flooding_config(&self) -> FloodingConfig {
        self.flooding
    }

    pub fn set_formula(&mut self, formula: FixpointFormula) {
        self.flooding.formula = formula;
    }

    pub fn set_coefficient(&mut self, coefficient: PropagationCoefficient) {
        self.flooding.coefficient = coefficient;
    }
}

impl<'g, G: GraphView> SimilarityAlgorithm for SimilarityFlooding<'g, G> {
    type Vertex = G::Vertex;

    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::SimilarityFlooding
    }

    fn iteration_config(&self) -> &IterationConfig {
        &self.config
    }

    fn iteration_config_mut(&mut self) -> &mut IterationConfig {
        &mut self.config
    }

    fn calculate(&mut self) -> SimilarityMatrix<G::Vertex> {
        let a = IndexedGraph::new(self.a);
        let b = IndexedGraph::new(self.b);
        info!(
            "SimilarityFlooding: {}x{} vertex pairs, {:?}, {} iterations",
            a.num_vertices(),
            b.num_vertices(),
            self.flooding,
            self.config.num_iterations
        );

        let labels: HashSet<&G::Label> = a.edges.iter().map(|(_, _, label)| label).collect();
        let matching = edges_with_labels(self.b, &b, &labels);
        let propagation = PropagationGraph::new(&a, &b, &matching, self.flooding.coefficient);
        trace!("propagation graph has {} edges", propagation.edges.len());

        let initial = Array2::<f64>::ones((a.num_vertices(), b.num_vertices()));
        let formula = self.flooding.formula;
        let outcome = iterate(
            &self.config,
            initial.clone(),
            |sigma| propagation.sweep(&initial, sigma, formula),
            l2_distance,
        );

        let matrix = SimilarityMatrix::from_dense(&a.vertices, &b.vertices, &outcome.state);
        self.iterations = outcome.iterations;
        info!(
            "{}: {} iterations performed, converged: {}",
            self.kind(),
            outcome.iterations,
            outcome.converged
        );
        self.result = Some(matrix.clone());
        matrix
    }

    fn result(&self) -> Option<&SimilarityMatrix<G::Vertex>> {
        self.result.as_ref()
    }

    fn iterations_performed(&self) -> usize {
        self.iterations
    }
}

type Pair = (usize, usize);

/// Induced propagation graph over vertex pairs. Derived once per calculation
/// and read-only during the sweeps.
#[derive(Debug)]
struct PropagationGraph {
    edges: Vec<(Pair, Pair, f64)>,
}

/// Number of edges with a given label leaving and entering each vertex.
fn label_degrees<L: Eq + Hash>(edges: &[(usize, usize, L)]) -> (HashMap<(usize, &L), usize>, HashMap<(usize, &L), usize>) {
    let mut outgoing = HashMap::new();
    let mut incoming = HashMap::new();
    for (source, target, label) in edges {
        *outgoing.entry((*source, label)).or_insert(0) += 1;
        *incoming.entry((*target, label)).or_insert(0) += 1;
    }
    (outgoing, incoming)
}

/// Edges of `graph` carrying one of `labels`, as vertex indices of `indexed`.
fn edges_with_labels<'l, G: GraphView>(
    graph: &G,
    indexed: &IndexedGraph<G::Vertex, G::Label>,
    labels: &HashSet<&'l G::Label>,
) -> HashMap<&'l G::Label, Vec<Pair>> {
    labels
        .iter()
        .map(|&label| {
            let edges = graph
                .edges_by_label(label)
                .into_iter()
                .filter_map(|e| Some((indexed.index_of(&e.source)?, indexed.index_of(&e.target)?)))
                .collect();
            (label, edges)
        })
        .collect()
}

fn degree<'a, L: Eq + Hash>(degrees: &HashMap<(usize, &'a L), usize>, vertex: usize, label: &'a L) -> usize {
    degrees.get(&(vertex, label)).cloned().unwrap_or(0)
}

impl PropagationGraph {
    fn new<V, L: Eq + Hash>(
        a: &IndexedGraph<V, L>,
        b: &IndexedGraph<V, L>,
        matching: &HashMap<&L, Vec<Pair>>,
        coefficient: PropagationCoefficient,
    ) -> PropagationGraph {
        let (out_a, in_a) = label_degrees(&a.edges);
        let (out_b, in_b) = label_degrees(&b.edges);

        let mut edges = Vec::new();
        for (a1, a2, label) in &a.edges {
            let same_label = match matching.get(label) {
                Some(same_label) => same_label,
                None => continue,
            };
            for &(b1, b2) in same_label {
                let forward = coefficient.weight(degree(&out_a, *a1, label), degree(&out_b, b1, label));
                let backward = coefficient.weight(degree(&in_a, *a2, label), degree(&in_b, b2, label));
                edges.push(((*a1, b1), (*a2, b2), forward));
                edges.push(((*a2, b2), (*a1, b1), backward));
            }
        }
        PropagationGraph { edges }
    }

    /// φ: every pair receives the weighted scores of its neighbors.
    fn propagate(&self, sigma: &Array2<f64>) -> Array2<f64> {
        let mut flow = Array2::zeros(sigma.dim());
        for &(from, to, weight) in &self.edges {
            flow[to] += sigma[from] * weight;
        }
        flow
    }

    fn sweep(&self, initial: &Array2<f64>, sigma: &Array2<f64>, formula: FixpointFormula) -> Array2<f64> {
        let mut next = match formula {
            FixpointFormula::Basic => sigma + &self.propagate(sigma),
            FixpointFormula::A => initial + &self.propagate(sigma),
            FixpointFormula::B => self.propagate(&(initial + sigma)),
            FixpointFormula::C => {
                let combined = initial + sigma;
                let flow = self.propagate(&combined);
                combined + &flow
            }
        };
        let max = next.iter().cloned().fold(0.0, f64::max);
        if max > 0.0 {
            next.mapv_inplace(|s| s / max);
        }
        next
    }
}
