//! The bifurcation sweep: re-locate every steady state of the model
//! across a range of forcing values and bucket the refined roots into
//! branches bounded by the baseline extrema.

use anyhow::{bail, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extrema::find_extrema;
use crate::rootfind::{find_brackets, refine_root, SecantSettings};
use crate::sampling::{DomainSample, GridSpec};
use crate::traits::ScalarModel;

/// Settings controlling the forcing-parameter sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SweepSettings {
    pub forcing_min: f64,
    pub forcing_max: f64,
    /// Number of forcing samples across the range, endpoints included.
    pub steps: usize,
    pub secant: SecantSettings,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            forcing_min: -30.0,
            forcing_max: 30.0,
            steps: 6001,
            secant: SecantSettings::default(),
        }
    }
}

impl SweepSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.forcing_min.is_finite()
            || !self.forcing_max.is_finite()
            || self.forcing_max <= self.forcing_min
        {
            bail!("Forcing range must be finite with max > min.");
        }
        if self.steps < 2 {
            bail!("Sweep needs at least 2 forcing steps.");
        }
        Ok(())
    }

    /// Forcing value of sweep step `i`.
    pub fn forcing_value(&self, index: usize) -> f64 {
        let fraction = index as f64 / (self.steps - 1) as f64;
        self.forcing_min + (self.forcing_max - self.forcing_min) * fraction
    }
}

/// One branch of the bifurcation diagram: parallel append-only
/// sequences of forcing values and the roots found at them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub forcings: Vec<f64>,
    pub roots: Vec<f64>,
}

impl Branch {
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Iterates over `(forcing, root)` pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.forcings.iter().copied().zip(self.roots.iter().copied())
    }
}

/// The full bifurcation diagram produced by one sweep run.
///
/// `boundaries` holds the baseline extrema in domain coordinates, in
/// ascending order; there is always one more branch than boundary
/// (one band below each boundary plus the catch-all above the last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BifurcationDataset {
    pub boundaries: Vec<f64>,
    pub branches: Vec<Branch>,
}

/// Immutable record of all converged roots at one forcing value.
/// Steps are computed independently and merged afterward, so the sweep
/// can run data-parallel without shared mutable branch state.
struct SweepStep {
    forcing: f64,
    roots: Vec<f64>,
}

fn sweep_step(
    model: &impl ScalarModel,
    baseline: &DomainSample,
    forcing: f64,
    secant: SecantSettings,
) -> SweepStep {
    let shifted: Vec<f64> = baseline.values.iter().map(|v| v + forcing).collect();
    let mut roots = Vec::new();
    for bracket in find_brackets(&shifted) {
        let x0 = baseline.spec.coord(bracket.left);
        let x1 = baseline.spec.coord(bracket.right);
        match refine_root(model, forcing, x0, x1, secant) {
            Ok(root) => roots.push(root),
            Err(failure) => {
                warn!(forcing, x0, x1, error = %failure, "dropping unconverged root candidate");
            }
        }
    }
    SweepStep { forcing, roots }
}

/// Index of the first boundary strictly greater than the root, or the
/// final catch-all branch when no boundary lies above it. A root that
/// lands exactly on a boundary falls through to the band above it.
fn branch_index(boundaries: &[f64], root: f64) -> usize {
    boundaries
        .iter()
        .position(|&boundary| root < boundary)
        .unwrap_or(boundaries.len())
}

/// Runs the full bifurcation sweep of `model` over `grid`.
///
/// Samples the baseline (zero forcing) curve once, derives branch
/// boundaries from its extrema, then for every forcing value in the
/// sweep range shifts the baseline, brackets the sign changes, and
/// refines each bracket with the secant method against the actual
/// model. Converged roots are appended to their branch in ascending
/// forcing order; refinement failures are logged and skipped.
pub fn sweep_bifurcation<M>(
    model: &M,
    grid: GridSpec,
    settings: SweepSettings,
) -> Result<BifurcationDataset>
where
    M: ScalarModel + Sync,
{
    settings.validate()?;
    let baseline = grid.sample(model, 0.0)?;

    let boundaries: Vec<f64> = find_extrema(&baseline.values)
        .iter()
        .map(|extremum| grid.coord(extremum.right))
        .collect();

    let steps: Vec<SweepStep> = (0..settings.steps)
        .into_par_iter()
        .map(|i| sweep_step(model, &baseline, settings.forcing_value(i), settings.secant))
        .collect();

    // Sequential merge in ascending forcing order keeps branch contents
    // deterministic regardless of how the steps were scheduled.
    let mut branches = vec![Branch::default(); boundaries.len() + 1];
    for step in steps {
        for root in step.roots {
            let branch = &mut branches[branch_index(&boundaries, root)];
            branch.forcings.push(step.forcing);
            branch.roots.push(root);
        }
    }

    Ok(BifurcationDataset {
        boundaries,
        branches,
    })
}
