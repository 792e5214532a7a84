//! Error types.

use crate::AlgorithmKind;
use thiserror::Error;

/// Rejected algorithm selection or configuration. Raised before any
/// computation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{algorithm} requires {expected} graph(s), got {got}")]
    WrongGraphCount {
        algorithm: AlgorithmKind,
        expected: usize,
        got: usize,
    },

    #[error("{algorithm} requires directed graphs, graph #{index} is undirected")]
    NotDirected { algorithm: AlgorithmKind, index: usize },

    #[error("{algorithm} requires multi-edged graphs, graph #{index} is not multi-edged")]
    NotMultiEdged { algorithm: AlgorithmKind, index: usize },

    #[error("unknown algorithm `{0}` (expected SimRank, SimilarityFlooding or CoupledNodeEdgeScoring)")]
    UnknownAlgorithm(String),

    #[error("damping constant must lie in (0, 1], got {0}")]
    InvalidDampingConstant(f64),

    #[error("tolerance must be a positive finite number, got {0}")]
    InvalidTolerance(f64),

    #[error("{algorithm} has no parameter `{parameter}`")]
    UnsupportedParameter {
        algorithm: AlgorithmKind,
        parameter: &'static str,
    },
}

/// Failure to derive a one-to-one vertex matching from a similarity matrix.
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("assignment problem could not be solved: {0:?}")]
    Unsolvable(munkres::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
