//! Fixed-point iteration shared by all algorithms.

use crate::error::{ConfigurationError, Result};
use log::debug;
use ndarray::{Array2, Zip};

/// Number of sweeps when nothing else is configured.
pub const DEFAULT_NUM_ITERATIONS: usize = 100;

/// How long an algorithm iterates.
///
/// By default exactly `num_iterations` sweeps are performed. With a
/// `tolerance`, iteration stops early once the residual between two
/// consecutive sweeps drops below it. What the residual measures depends on
/// the algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationConfig {
    pub num_iterations: usize,
    pub tolerance: Option<f64>,
}

impl Default for IterationConfig {
    fn default() -> Self {
        IterationConfig {
            num_iterations: DEFAULT_NUM_ITERATIONS,
            tolerance: None,
        }
    }
}

impl IterationConfig {
    pub fn with_iterations(num_iterations: usize) -> IterationConfig {
        IterationConfig {
            num_iterations,
            ..Default::default()
        }
    }

    pub fn set_tolerance(&mut self, tolerance: Option<f64>) -> Result<()> {
        if let Some(eps) = tolerance {
            if !(eps.is_finite() && eps > 0.0) {
                return Err(ConfigurationError::InvalidTolerance(eps));
            }
        }
        self.tolerance = tolerance;
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct Outcome<S> {
    pub state: S,
    pub iterations: usize,
    pub converged: bool,
}

/// Applies `step` until the iteration budget is exhausted or, with a
/// tolerance configured, `residual(previous, next)` falls below it.
/// Every step receives the complete previous state.
pub(crate) fn iterate<S, F, R>(config: &IterationConfig, initial: S, mut step: F, residual: R) -> Outcome<S>
where
    F: FnMut(&S) -> S,
    R: Fn(&S, &S) -> f64,
{
    let mut state = initial;
    for i in 0..config.num_iterations {
        let next = step(&state);
        if let Some(eps) = config.tolerance {
            let r = residual(&state, &next);
            debug!("iteration {}: residual {:e}", i + 1, r);
            state = next;
            if r < eps {
                debug!("converged after {} iterations", i + 1);
                return Outcome {
                    state,
                    iterations: i + 1,
                    converged: true,
                };
            }
        } else {
            state = next;
        }
    }
    Outcome {
        state,
        iterations: config.num_iterations,
        converged: false,
    }
}

pub(crate) fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    let mut max = 0.0f64;
    Zip::from(a).and(b).apply(|&x, &y| max = max.max((x - y).abs()));
    max
}

/// Euclidean length of `a - b`, treating the matrices as vectors.
pub(crate) fn l2_distance(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    let mut sum = 0.0;
    Zip::from(a).and(b).apply(|&x, &y| sum += (x - y) * (x - y));
    sum.sqrt()
}

pub(crate) fn frobenius_norm(a: &Array2<f64>) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}
