use crate::error::{ConfigurationError, Result};
use crate::graph_traits::GraphView;
use crate::iteration::IterationConfig;
use crate::{AlgorithmKind, SimilarityMatrix};

/// Behaviour shared by all similarity algorithms.
///
/// An algorithm is bound to its input graph(s) at construction. `calculate`
/// runs the configured number of sweeps and returns the resulting matrix,
/// keeping a copy for later point queries.
pub trait SimilarityAlgorithm {
    type Vertex: Clone + Ord;

    fn kind(&self) -> AlgorithmKind;

    fn iteration_config(&self) -> &IterationConfig;

    fn iteration_config_mut(&mut self) -> &mut IterationConfig;

    fn calculate(&mut self) -> SimilarityMatrix<Self::Vertex>;

    /// The matrix of the last `calculate` call.
    fn result(&self) -> Option<&SimilarityMatrix<Self::Vertex>>;

    /// Sweeps performed by the last `calculate` call.
    fn iterations_performed(&self) -> usize;

    fn set_iteration_count(&mut self, num_iterations: usize) {
        self.iteration_config_mut().num_iterations = num_iterations;
    }

    /// Enables (`Some`) or disables (`None`) early exit on convergence.
    fn set_tolerance(&mut self, tolerance: Option<f64>) -> Result<()> {
        self.iteration_config_mut().set_tolerance(tolerance)
    }

    /// `None` before `calculate` or for pairs not in the result.
    fn get_similarity(&self, a: &Self::Vertex, b: &Self::Vertex) -> Option<f64> {
        self.result().and_then(|m| m.get(a, b))
    }

    fn dump_all(&self) -> Vec<(Self::Vertex, Self::Vertex, f64)> {
        self.result().map(|m| m.to_vec()).unwrap_or_default()
    }
}

/// Checks graph count and the structural capabilities an algorithm relies on.
pub(crate) fn require_graphs<G: GraphView>(
    algorithm: AlgorithmKind,
    graphs: &[&G],
    expected: usize,
    multiedged: bool,
) -> Result<()> {
    if graphs.len() != expected {
        return Err(ConfigurationError::WrongGraphCount {
            algorithm,
            expected,
            got: graphs.len(),
        });
    }
    for (index, graph) in graphs.iter().enumerate() {
        if !graph.is_directed() {
            return Err(ConfigurationError::NotDirected { algorithm, index });
        }
        if multiedged && !graph.is_multiedged() {
            return Err(ConfigurationError::NotMultiEdged { algorithm, index });
        }
    }
    Ok(())
}
