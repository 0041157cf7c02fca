//! The sea-ice energy-balance model.
//!
//! A zero-dimensional radiative balance for Arctic surface temperature:
//! absorbed shortwave flux (with a smooth ice/water albedo transition
//! around the melting point) minus outgoing longwave radiation, plus an
//! additive forcing offset that serves as the bifurcation parameter.

use serde::{Deserialize, Serialize};

use crate::bump::bump;
use crate::traits::ScalarModel;

/// Stefan-Boltzmann constant, W m^-2 K^-4.
pub const STEFAN_BOLTZMANN: f64 = 5.670374419e-8;

/// Physical constants of the energy-balance model.
///
/// Injected into [`SeaIceModel`] so tests and alternative climates can
/// replace the constants without touching the root-finding machinery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Solar constant S, W m^-2.
    pub solar_constant: f64,
    /// Effective longwave emissivity.
    pub emissivity: f64,
    /// Albedo of bare ice.
    pub ice_albedo: f64,
    /// Albedo of open water.
    pub water_albedo: f64,
    /// Melting point of ice, K.
    pub melt_point: f64,
    /// Half-width of the ice-to-water albedo transition, K.
    pub transition_half_width: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            solar_constant: 1360.8,
            emissivity: 0.612,
            ice_albedo: 0.55,
            water_albedo: 0.3,
            melt_point: 273.15,
            transition_half_width: 10.0,
        }
    }
}

/// The scalar sea-ice model `dT/dt = S(1 - a(T))/4 - eps sigma T^4 + forcing`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeaIceModel {
    pub params: ModelParams,
}

impl SeaIceModel {
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }

    /// Temperature-dependent albedo: ice value below the transition
    /// window, water value above, joined smoothly by the bump function.
    pub fn albedo(&self, temperature: f64) -> f64 {
        let p = &self.params;
        let onset = p.melt_point - p.transition_half_width;
        let width = 2.0 * p.transition_half_width;
        (p.water_albedo - p.ice_albedo) * bump((temperature - onset) / width) + p.ice_albedo
    }
}

impl Default for SeaIceModel {
    fn default() -> Self {
        Self::new(ModelParams::default())
    }
}

impl ScalarModel for SeaIceModel {
    fn evaluate(&self, temperature: f64, forcing: f64) -> f64 {
        let p = &self.params;
        let absorbed = p.solar_constant * (1.0 - self.albedo(temperature)) / 4.0;
        let emitted = p.emissivity * STEFAN_BOLTZMANN * temperature.powi(4);
        absorbed - emitted + forcing
    }
}

#[cfg(test)]
mod tests {
    use super::{ModelParams, SeaIceModel, STEFAN_BOLTZMANN};
    use crate::traits::ScalarModel;

    #[test]
    fn albedo_saturates_outside_transition_window() {
        let model = SeaIceModel::default();
        assert!((model.albedo(200.0) - 0.55).abs() < 1e-12);
        assert!((model.albedo(263.15) - 0.55).abs() < 1e-12);
        assert!((model.albedo(283.15) - 0.3).abs() < 1e-12);
        assert!((model.albedo(370.0) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn albedo_decreases_through_transition() {
        let model = SeaIceModel::default();
        let mut prev = model.albedo(260.0);
        for i in 1..=100 {
            let t = 260.0 + 0.3 * i as f64;
            let value = model.albedo(t);
            assert!(value <= prev + 1e-15);
            prev = value;
        }
    }

    #[test]
    fn evaluate_matches_radiative_balance_in_ice_regime() {
        let model = SeaIceModel::default();
        let temperature: f64 = 220.0;
        let expected = 1360.8 * (1.0 - 0.55) / 4.0
            - 0.612 * STEFAN_BOLTZMANN * temperature.powi(4);
        assert!((model.evaluate(temperature, 0.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn forcing_shifts_the_balance_additively() {
        let model = SeaIceModel::default();
        let base = model.evaluate(250.0, 0.0);
        assert!((model.evaluate(250.0, 12.5) - (base + 12.5)).abs() < 1e-12);
        assert!((model.evaluate(250.0, -30.0) - (base - 30.0)).abs() < 1e-12);
    }

    #[test]
    fn params_are_injectable() {
        let params = ModelParams {
            emissivity: 1.0,
            ..ModelParams::default()
        };
        let model = SeaIceModel::new(params);
        let colder = model.evaluate(300.0, 0.0);
        let reference = SeaIceModel::default().evaluate(300.0, 0.0);
        // Higher emissivity radiates more, lowering the balance.
        assert!(colder < reference);
    }
}
