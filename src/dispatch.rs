use crate::algorithm::SimilarityAlgorithm;
use crate::coupled::CoupledNodeEdgeScoring;
use crate::error::{ConfigurationError, Result};
use crate::flooding::SimilarityFlooding;
use crate::graph_traits::GraphView;
use crate::iteration::IterationConfig;
use crate::simrank::SimRank;
use crate::SimilarityMatrix;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    SimRank,
    SimilarityFlooding,
    CoupledNodeEdgeScoring,
}

impl AlgorithmKind {
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::SimRank => "SimRank",
            AlgorithmKind::SimilarityFlooding => "SimilarityFlooding",
            AlgorithmKind::CoupledNodeEdgeScoring => "CoupledNodeEdgeScoring",
        }
    }

    /// Checks the graphs against the structural requirements of the
    /// algorithm without building it.
    pub fn validate<G: GraphView>(self, graphs: &[&G]) -> Result<()> {
        match self {
            AlgorithmKind::SimRank => SimRank::validate(graphs),
            AlgorithmKind::SimilarityFlooding => SimilarityFlooding::validate(graphs),
            AlgorithmKind::CoupledNodeEdgeScoring => CoupledNodeEdgeScoring::validate(graphs),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SimRank" => Ok(AlgorithmKind::SimRank),
            "SimilarityFlooding" => Ok(AlgorithmKind::SimilarityFlooding),
            "CoupledNodeEdgeScoring" => Ok(AlgorithmKind::CoupledNodeEdgeScoring),
            other => Err(ConfigurationError::UnknownAlgorithm(other.to_string())),
        }
    }
}

macro_rules! delegate {
    ($algorithm:expr, $inner:ident => $body:expr) => {
        match $algorithm {
            Algorithm::SimRank($inner) => $body,
            Algorithm::SimilarityFlooding($inner) => $body,
            Algorithm::CoupledNodeEdgeScoring($inner) => $body,
        }
    };
}

/// A validated algorithm bound to its input graph(s), as returned by
/// [`select`].
#[derive(Debug)]
pub enum Algorithm<'g, G: GraphView> {
    SimRank(SimRank<'g, G>),
    SimilarityFlooding(SimilarityFlooding<'g, G>),
    CoupledNodeEdgeScoring(CoupledNodeEdgeScoring<'g, G>),
}

impl<'g, G: GraphView> Algorithm<'g, G> {
    /// Only SimRank has a damping constant.
    pub fn set_damping_constant(&mut self, c: f64) -> Result<()> {
        match self {
            Algorithm::SimRank(s) => s.set_damping_constant(c),
            other => Err(ConfigurationError::UnsupportedParameter {
                algorithm: other.kind(),
                parameter: "damping constant",
            }),
        }
    }
}

impl<'g, G: GraphView> SimilarityAlgorithm for Algorithm<'g, G> {
    type Vertex = G::Vertex;

    fn kind(&self) -> AlgorithmKind {
        delegate!(self, s => s.kind())
    }

    fn iteration_config(&self) -> &IterationConfig {
        delegate!(self, s => s.iteration_config())
    }

    fn iteration_config_mut(&mut self) -> &mut IterationConfig {
        delegate!(self, s => s.iteration_config_mut())
    }

    fn calculate(&mut self) -> SimilarityMatrix<G::Vertex> {
        delegate!(self, s => s.calculate())
    }

    fn result(&self) -> Option<&SimilarityMatrix<G::Vertex>> {
        delegate!(self, s => s.result())
    }

    fn iterations_performed(&self) -> usize {
        delegate!(self, s => s.iterations_performed())
    }
}

/// Selects the algorithm called `name`, validates `graphs` against its
/// requirements and binds it to them. The shared default iteration count
/// applies until overridden.
pub fn select<'g, G: GraphView>(name: &str, graphs: &[&'g G]) -> Result<Algorithm<'g, G>> {
    let kind: AlgorithmKind = name.parse()?;
    kind.validate(graphs)?;
    Ok(match kind {
        AlgorithmKind::SimRank => Algorithm::SimRank(SimRank::new(graphs[0])?),
        AlgorithmKind::SimilarityFlooding => {
            Algorithm::SimilarityFlooding(SimilarityFlooding::new(graphs[0], graphs[1])?)
        }
        AlgorithmKind::CoupledNodeEdgeScoring => {
            Algorithm::CoupledNodeEdgeScoring(CoupledNodeEdgeScoring::new(graphs[0], graphs[1])?)
        }
    })
}

/// One or two input graphs awaiting an algorithm.
#[derive(Debug)]
pub struct GraphSimilarity<'g, G: GraphView> {
    graphs: Vec<&'g G>,
}

impl<'g, G: GraphView> GraphSimilarity<'g, G> {
    pub fn new(graphs: Vec<&'g G>) -> GraphSimilarity<'g, G> {
        GraphSimilarity { graphs }
    }

    pub fn single(graph: &'g G) -> GraphSimilarity<'g, G> {
        Self::new(vec![graph])
    }

    pub fn pair(a: &'g G, b: &'g G) -> GraphSimilarity<'g, G> {
        Self::new(vec![a, b])
    }

    pub fn graphs(&self) -> &[&'g G] {
        &self.graphs
    }

    pub fn select(&self, name: &str) -> Result<Algorithm<'g, G>> {
        select(name, &self.graphs)
    }
}
