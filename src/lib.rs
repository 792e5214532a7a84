//! Vertex similarity scores within one graph or between two graphs.
//!
//! Three algorithms are provided:
//!
//! * [`SimRank`] over a single directed graph,
//! * [`SimilarityFlooding`] between two directed, multi-edged graphs with
//!   labeled edges,
//! * [`CoupledNodeEdgeScoring`] between two directed graphs.
//!
//! Each runs a fixed number of sweeps (100 unless configured otherwise) and
//! produces a [`SimilarityMatrix`]. [`select`] picks an algorithm by name and
//! checks that the input graphs fit it:
//!
//! ```
//! use graph_similarity::{select, LabeledGraph, SimilarityAlgorithm};
//!
//! let mut g: LabeledGraph<&str> = LabeledGraph::new_directed();
//! g.add_edge("x", "a", ());
//! g.add_edge("x", "b", ());
//!
//! let mut simrank = select("SimRank", &[&g]).unwrap();
//! simrank.set_damping_constant(0.8).unwrap();
//! simrank.calculate();
//! assert_eq!(Some(0.8), simrank.get_similarity(&"a", &"b"));
//! ```

mod algorithm;
mod assignment;
mod coupled;
mod dispatch;
mod error;
mod flooding;
pub mod graph;
mod graph_traits;
mod indexed;
mod iteration;
mod score_norm;
mod similarity_matrix;
mod simrank;

pub use crate::graph::LabeledGraph;
pub use {
    algorithm::*, coupled::*, dispatch::*, error::*, flooding::*, graph_traits::*, iteration::*,
    score_norm::*, similarity_matrix::*, simrank::*,
};
