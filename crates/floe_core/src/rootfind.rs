//! Root location over a sampled curve: sign-change bracketing followed
//! by secant refinement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::ScalarModel;

/// A pair of adjacent grid indices whose sampled values straddle zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub left: usize,
    pub right: usize,
}

/// Scans sampled values for sign changes between adjacent grid cells.
///
/// Returns one [`Bracket`] per cell with `values[i] * values[i+1] < 0`,
/// in ascending index order. A value that is exactly zero at a grid
/// node is not counted as a sign change by either adjacent pair; such
/// a root is only picked up once the sweep shifts it off the node.
pub fn find_brackets(values: &[f64]) -> Vec<Bracket> {
    let mut brackets = Vec::new();
    for i in 0..values.len().saturating_sub(1) {
        if values[i] * values[i + 1] < 0.0 {
            brackets.push(Bracket {
                left: i,
                right: i + 1,
            });
        }
    }
    brackets
}

/// Settings controlling the secant iteration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SecantSettings {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SecantSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 50,
        }
    }
}

/// Recoverable failure modes of [`refine_root`].
///
/// Neither is fatal to a sweep: the caller drops the candidate root,
/// logs, and moves on.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SecantFailure {
    #[error("no convergence after {iterations} iterations (|f| = {residual:e})")]
    IterationBudgetExhausted { iterations: usize, residual: f64 },
    #[error("degenerate secant step: consecutive iterates share a function value")]
    DegenerateStep,
}

/// Refines a bracketed root of `model(x, forcing)` via secant iteration.
///
/// Seeded with `x0` and `x1`, iterates
/// `x_n = x_{n-1} - f(x_{n-1}) (x_{n-1} - x_{n-2}) / (f(x_{n-1}) - f(x_{n-2}))`
/// and succeeds as soon as `|f(x_n)| < settings.tolerance`. An exactly
/// flat secant slope is reported as [`SecantFailure::DegenerateStep`]
/// instead of dividing by zero.
pub fn refine_root(
    model: &impl ScalarModel,
    forcing: f64,
    x0: f64,
    x1: f64,
    settings: SecantSettings,
) -> Result<f64, SecantFailure> {
    let mut prev = x0;
    let mut current = x1;
    let mut f_prev = model.evaluate(prev, forcing);
    let mut f_current = model.evaluate(current, forcing);

    for _ in 0..settings.max_iterations {
        let denom = f_current - f_prev;
        if denom == 0.0 {
            return Err(SecantFailure::DegenerateStep);
        }
        let next = current - f_current * (current - prev) / denom;
        let f_next = model.evaluate(next, forcing);

        prev = current;
        f_prev = f_current;
        current = next;
        f_current = f_next;

        if f_current.abs() < settings.tolerance {
            return Ok(current);
        }
    }

    Err(SecantFailure::IterationBudgetExhausted {
        iterations: settings.max_iterations,
        residual: f_current.abs(),
    })
}
