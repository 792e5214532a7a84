//! SimRank according to [this paper][1]: two vertices are similar if their
//! predecessors are similar.
//!
//! [1]: https://doi.org/10.1145/775047.775126 "2002, Glen Jeh and Jennifer Widom,
//!      SimRank: A Measure of Structural-Context Similarity"

use crate::algorithm::{require_graphs, SimilarityAlgorithm};
use crate::error::{ConfigurationError, Result};
use crate::graph_traits::GraphView;
use crate::indexed::IndexedGraph;
use crate::iteration::{iterate, max_abs_diff, IterationConfig};
use crate::{AlgorithmKind, SimilarityMatrix};
use closed01::Closed01;
use log::info;
use ndarray::Array2;

pub const DEFAULT_DAMPING_CONSTANT: f64 = 0.6;

/// SimRank over a single directed graph.
#[derive(Debug)]
pub struct SimRank<'g, G: GraphView> {
    graph: &'g G,
    damping: Closed01<f64>,
    config: IterationConfig,
    result: Option<SimilarityMatrix<G::Vertex>>,
    iterations: usize,
}

impl<'g, G: GraphView> SimRank<'g, G> {
    /// Exactly one directed graph.
    pub fn validate(graphs: &[&G]) -> Result<()> {
        require_graphs(AlgorithmKind::SimRank, graphs, 1, false)
    }

    pub fn new(graph: &'g G) -> Result<Self> {
        Self::validate(&[graph])?;
        Ok(SimRank {
            graph,
            damping: Closed01::new(DEFAULT_DAMPING_CONSTANT),
            config: IterationConfig::default(),
            result: None,
            iterations: 0,
        })
    }

    pub fn damping_constant(&self) -> f64 {
        self.damping.get()
    }

    /// The constant must lie in (0, 1]. The SimRank paper uses 0.8.
    pub fn set_damping_constant(&mut self, c: f64) -> Result<()> {
        if !(c > 0.0 && c <= 1.0) {
            return Err(ConfigurationError::InvalidDampingConstant(c));
        }
        self.damping = Closed01::new(c);
        Ok(())
    }
}

impl<'g, G: GraphView> SimilarityAlgorithm for SimRank<'g, G> {
    type Vertex = G::Vertex;

    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::SimRank
    }

    fn iteration_config(&self) -> &IterationConfig {
        &self.config
    }

    fn iteration_config_mut(&mut self) -> &mut IterationConfig {
        &mut self.config
    }

    fn calculate(&mut self) -> SimilarityMatrix<G::Vertex> {
        let graph = IndexedGraph::new(self.graph);
        let n = graph.num_vertices();
        let damping = self.damping.get();
        info!(
            "SimRank: {} vertices, damping {}, {} iterations",
            n, damping, self.config.num_iterations
        );

        let predecessors = &graph.predecessors;
        let outcome = iterate(
            &self.config,
            Array2::<f64>::eye(n),
            |prev| sweep(prev, predecessors, damping),
            max_abs_diff,
        );

        let matrix = SimilarityMatrix::from_dense(&graph.vertices, &graph.vertices, &outcome.state);
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

/// One SimRank sweep. Only the upper triangle is computed; the lower one is
/// mirrored so that the result is exactly symmetric.
///
/// This is the hot path: O(V² · avg_in_degree²) per sweep.
fn sweep(prev: &Array2<f64>, predecessors: &[Vec<usize>], damping: f64) -> Array2<f64> {
    let n = predecessors.len();
    let mut next = Array2::<f64>::eye(n);
    for i in 0..n {
        let pi = &predecessors[i];
        if pi.is_empty() {
            continue;
        }
        for j in (i + 1)..n {
            let pj = &predecessors[j];
            if pj.is_empty() {
                continue;
            }
            let mut sum = 0.0;
            for &p in pi {
                for &q in pj {
                    sum += prev[(p, q)];
                }
            }
            let score = damping / (pi.len() * pj.len()) as f64 * sum;
            next[(i, j)] = score;
            next[(j, i)] = score;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LabeledGraph;
    use crate::graph_traits::Edge;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn graph(edges: &[(&'static str, &'static str)]) -> LabeledGraph<&'static str> {
        let mut g = LabeledGraph::new_directed();
        for &(s, t) in edges {
            g.add_edge(s, t, ());
        }
        g
    }

    // The university example of the SimRank paper.
    fn university() -> LabeledGraph<&'static str> {
        graph(&[
            ("Univ", "ProfA"),
            ("Univ", "ProfB"),
            ("ProfA", "StudentA"),
            ("ProfB", "StudentB"),
            ("StudentA", "Univ"),
            ("StudentB", "ProfB"),
        ])
    }

    #[test]
    fn test_defaults() {
        let g = university();
        let s = SimRank::new(&g).unwrap();
        assert_eq!(DEFAULT_DAMPING_CONSTANT, s.damping_constant());
        assert_eq!(100, s.iteration_config().num_iterations);
        assert_eq!(None, s.iteration_config().tolerance);
        assert!(s.result().is_none());
        assert_eq!(None, s.get_similarity(&"Univ", &"Univ"));
    }

    #[test]
    fn test_university() {
        let g = university();
        let mut s = SimRank::new(&g).unwrap();
        s.set_damping_constant(0.8).unwrap();
        let m = s.calculate();

        assert_eq!(25, m.len());
        assert_eq!(100, s.iterations_performed());
        assert_relative_eq!(0.413551, m.get(&"ProfA", &"ProfB").unwrap(), epsilon = 1e-6);
        assert_relative_eq!(0.330841, m.get(&"StudentA", &"StudentB").unwrap(), epsilon = 1e-6);
        assert_relative_eq!(0.132336, m.get(&"Univ", &"ProfB").unwrap(), epsilon = 1e-6);
        assert_relative_eq!(0.033878, m.get(&"Univ", &"StudentB").unwrap(), epsilon = 1e-6);
        assert_eq!(Some(0.0), m.get(&"Univ", &"ProfA"));
    }

    #[test]
    fn test_one_iteration() {
        let g = university();
        let mut s = SimRank::new(&g).unwrap();
        s.set_damping_constant(0.8).unwrap();
        s.set_iteration_count(1);
        s.calculate();

        // ProfA and ProfB share the predecessor Univ, nothing else has
        // propagated yet.
        assert_abs_diff_eq!(0.4, s.get_similarity(&"ProfA", &"ProfB").unwrap());
        assert_eq!(Some(0.0), s.get_similarity(&"StudentA", &"StudentB"));
    }

    #[test]
    fn test_common_predecessor() {
        let g = graph(&[("x", "a"), ("x", "b")]);
        let mut s = SimRank::new(&g).unwrap();
        s.calculate();
        assert_abs_diff_eq!(0.6, s.get_similarity(&"a", &"b").unwrap());
        assert_eq!(Some(0.0), s.get_similarity(&"x", &"a"));
    }

    #[test]
    fn test_two_cycle_stays_zero() {
        let g = graph(&[("a", "b"), ("b", "a")]);
        let mut s = SimRank::new(&g).unwrap();
        s.calculate();
        assert_eq!(Some(0.0), s.get_similarity(&"a", &"b"));
        assert_eq!(Some(1.0), s.get_similarity(&"a", &"a"));
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let g = university();
        let mut s = SimRank::new(&g).unwrap();
        s.set_iteration_count(0);
        let m = s.calculate();
        m.for_each_pair(|a, b, score| {
            assert_eq!(if a == b { 1.0 } else { 0.0 }, score);
        });
    }

    #[test]
    fn test_invalid_damping_constant() {
        let g = university();
        let mut s = SimRank::new(&g).unwrap();
        assert_eq!(
            Err(ConfigurationError::InvalidDampingConstant(0.0)),
            s.set_damping_constant(0.0)
        );
        assert!(s.set_damping_constant(1.5).is_err());
        assert!(s.set_damping_constant(-0.2).is_err());
        assert!(s.set_damping_constant(std::f64::NAN).is_err());
        assert_eq!(DEFAULT_DAMPING_CONSTANT, s.damping_constant());
        assert!(s.set_damping_constant(1.0).is_ok());
    }

    #[test]
    fn test_tolerance_stops_early() {
        let g = university();
        let mut s = SimRank::new(&g).unwrap();
        s.set_damping_constant(0.8).unwrap();
        s.set_tolerance(Some(1e-4)).unwrap();
        s.calculate();
        assert!(s.iterations_performed() < 100);
        assert_relative_eq!(0.413551, s.get_similarity(&"ProfA", &"ProfB").unwrap(), epsilon = 1e-3);
    }

    /// Adjacency given directly as predecessor lists, repeated entries kept.
    struct PredecessorLists(Vec<Vec<u32>>);

    impl GraphView for PredecessorLists {
        type Vertex = u32;
        type Label = ();

        fn vertices(&self) -> Vec<u32> {
            (0..self.0.len() as u32).collect()
        }

        fn edges(&self) -> Vec<Edge<u32, ()>> {
            self.vertices()
                .into_iter()
                .flat_map(|v| self.predecessors(&v).into_iter().map(move |p| Edge::new(p, v, ())))
                .collect()
        }

        fn predecessors(&self, v: &u32) -> Vec<u32> {
            self.0[*v as usize].clone()
        }

        fn successors(&self, v: &u32) -> Vec<u32> {
            self.edges()
                .into_iter()
                .filter(|e| e.source == *v)
                .map(|e| e.target)
                .collect()
        }

        fn is_directed(&self) -> bool {
            true
        }

        fn is_multiedged(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_parallel_edges_count_once() {
        let g = PredecessorLists(vec![vec![], vec![], vec![0, 0, 1], vec![0]]);
        assert_eq!(vec![0, 1], IndexedGraph::new(&g).predecessors[2]);

        let mut s = SimRank::new(&g).unwrap();
        s.set_iteration_count(1);
        s.calculate();
        assert_abs_diff_eq!(0.3, s.get_similarity(&2, &3).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_validate() {
        let directed = university();
        let undirected: LabeledGraph<&str> = LabeledGraph::new_undirected();

        assert!(SimRank::validate(&[&directed]).is_ok());
        assert_eq!(
            Err(ConfigurationError::WrongGraphCount {
                algorithm: AlgorithmKind::SimRank,
                expected: 1,
                got: 2
            }),
            SimRank::validate(&[&directed, &directed])
        );
        assert_eq!(
            Err(ConfigurationError::NotDirected {
                algorithm: AlgorithmKind::SimRank,
                index: 0
            }),
            SimRank::new(&undirected).map(|_| ())
        );
    }
}
