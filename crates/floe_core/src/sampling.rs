//! Uniform domain grids and model sampling.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::traits::ScalarModel;

/// A uniform, strictly increasing grid over a closed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl GridSpec {
    pub fn new(min: f64, max: f64, samples: usize) -> Result<Self> {
        let spec = Self { min, max, samples };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max <= self.min {
            bail!("Grid range must be finite with max > min.");
        }
        if self.samples < 2 {
            bail!("Grid needs at least 2 samples.");
        }
        Ok(())
    }

    /// Fixed step between adjacent grid points.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.samples - 1) as f64
    }

    /// Domain coordinate of grid index `i`.
    pub fn coord(&self, index: usize) -> f64 {
        self.min + self.step() * index as f64
    }

    /// Evaluates the model at every grid point for a fixed forcing.
    pub fn sample(&self, model: &impl ScalarModel, forcing: f64) -> Result<DomainSample> {
        self.validate()?;
        let values = (0..self.samples)
            .map(|i| model.evaluate(self.coord(i), forcing))
            .collect();
        Ok(DomainSample { spec: *self, values })
    }
}

/// The model evaluated over a [`GridSpec`] at a fixed forcing.
///
/// Coordinates are implicit: `values[i]` sits at `spec.coord(i)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSample {
    pub spec: GridSpec,
    pub values: Vec<f64>,
}
