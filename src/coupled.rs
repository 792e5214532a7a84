//! Coupled node-edge similarity scoring according to [this paper][1].
//!
//! Node scores `X` (|V_A| x |V_B|) and edge scores `Y` (|E_A| x |E_B|) are
//! updated from each other:
//!
//! ```text
//! Y'[ea, eb] = X[src(ea), src(eb)] + X[tgt(ea), tgt(eb)]
//! X'[a, b]   = Σ Y[ea, eb] over src(ea) = a, src(eb) = b
//!            + Σ Y[ea, eb] over tgt(ea) = a, tgt(eb) = b
//! ```
//!
//! after which both are divided by their Frobenius norm. Both start as
//! normalized all-ones matrices, except that `X` starts at zero when either
//! graph has no edges.
//!
//! [1]: https://doi.org/10.1016/j.aml.2007.01.006 "2008, Laura A. Zager and
//!      George C. Verghese, Graph similarity scoring and matching"

use crate::algorithm::{require_graphs, SimilarityAlgorithm};
use crate::error::Result;
use crate::graph_traits::GraphView;
use crate::indexed::IndexedGraph;
use crate::iteration::{frobenius_norm, iterate, l2_distance, IterationConfig};
use crate::{AlgorithmKind, SimilarityMatrix};
use log::info;
use ndarray::Array2;

/// Coupled node-edge scoring between two directed graphs.
#[derive(Debug)]
pub struct CoupledNodeEdgeScoring<'g, G: GraphView> {
    a: &'g G,
    b: &'g G,
    config: IterationConfig,
    result: Option<SimilarityMatrix<G::Vertex>>,
    iterations: usize,
}

impl<'g, G: GraphView> CoupledNodeEdgeScoring<'g, G> {
    /// Exactly two directed graphs.
    pub fn validate(graphs: &[&G]) -> Result<()> {
        require_graphs(AlgorithmKind::CoupledNodeEdgeScoring, graphs, 2, false)
    }

    pub fn new(a: &'g G, b: &'g G) -> Result<Self> {
        Self::validate(&[a, b])?;
        Ok(CoupledNodeEdgeScoring {
            a,
            b,
            config: IterationConfig::default(),
            result: None,
            iterations: 0,
        })
    }
}

impl<'g, G: GraphView> SimilarityAlgorithm for CoupledNodeEdgeScoring<'g, G> {
    type Vertex = G::Vertex;

    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::CoupledNodeEdgeScoring
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
            "CoupledNodeEdgeScoring: {}x{} vertex pairs, {}x{} edge pairs, {} iterations",
            a.num_vertices(),
            b.num_vertices(),
            a.num_edges(),
            b.num_edges(),
            self.config.num_iterations
        );

        let coupling = Coupling {
            shape: (a.num_vertices(), b.num_vertices()),
            edges_a: a.edges.iter().map(|&(s, t, _)| (s, t)).collect(),
            edges_b: b.edges.iter().map(|&(s, t, _)| (s, t)).collect(),
        };
        let outcome = iterate(
            &self.config,
            coupling.initial(),
            |state| coupling.sweep(state),
            // X alone can repeat while Y is still moving
            |prev, next| l2_distance(&prev.0, &next.0).hypot(l2_distance(&prev.1, &next.1)),
        );

        let (nodes, _edges) = outcome.state;
        let matrix = SimilarityMatrix::from_dense(&a.vertices, &b.vertices, &nodes);
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

struct Coupling {
    shape: (usize, usize),
    edges_a: Vec<(usize, usize)>,
    edges_b: Vec<(usize, usize)>,
}

impl Coupling {
    fn initial(&self) -> (Array2<f64>, Array2<f64>) {
        let mut edges = Array2::<f64>::ones((self.edges_a.len(), self.edges_b.len()));
        let mut nodes = if edges.is_empty() {
            Array2::<f64>::zeros(self.shape)
        } else {
            Array2::<f64>::ones(self.shape)
        };
        normalize(&mut nodes);
        normalize(&mut edges);
        (nodes, edges)
    }

    fn sweep(&self, state: &(Array2<f64>, Array2<f64>)) -> (Array2<f64>, Array2<f64>) {
        let (nodes, edges) = state;

        let mut next_edges = Array2::<f64>::zeros(edges.dim());
        let mut next_nodes = Array2::<f64>::zeros(self.shape);
        for (i, &(sa, ta)) in self.edges_a.iter().enumerate() {
            for (j, &(sb, tb)) in self.edges_b.iter().enumerate() {
                next_edges[(i, j)] = nodes[(sa, sb)] + nodes[(ta, tb)];

                let w = edges[(i, j)];
                next_nodes[(sa, sb)] += w;
                next_nodes[(ta, tb)] += w;
            }
        }

        normalize(&mut next_nodes);
        normalize(&mut next_edges);
        (next_nodes, next_edges)
    }
}

/// Scales to unit Frobenius norm. An all-zero matrix stays zero.
fn normalize(m: &mut Array2<f64>) {
    let norm = frobenius_norm(m);
    if norm > 0.0 {
        m.mapv_inplace(|x| x / norm);
    }
}
