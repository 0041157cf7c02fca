pub mod bump;
pub mod dataset;
pub mod extrema;
pub mod model;
pub mod rootfind;
pub mod sampling;
pub mod sweep;
/// The `floe_core` crate provides the numerical engine for the Floe CLI.
/// It computes steady states and bifurcation structure of a scalar
/// energy-balance ODE for Arctic sea ice as a forcing parameter varies.
///
/// Key components:
/// - **Traits**: `ScalarModel` (injectable model boundary).
/// - **Bump**: smooth non-analytic step/bump functions used by the albedo.
/// - **Rootfind**: sign-change bracketing and the secant refiner.
/// - **Sweep**: the forcing-parameter sweep producing the branch dataset.
pub mod traits;

pub use dataset::{read_branches, write_branches};
pub use rootfind::{find_brackets, refine_root, Bracket, SecantFailure, SecantSettings};
pub use sweep::{sweep_bifurcation, BifurcationDataset, Branch, SweepSettings};
pub use traits::ScalarModel;
