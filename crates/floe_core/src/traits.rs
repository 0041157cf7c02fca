/// A scalar model of the form `dT/dt = f(T) + forcing`.
///
/// The sweep machinery only ever talks to the model through this trait,
/// so the physical sea-ice equations can be swapped out for synthetic
/// functions in tests without touching the root-finding code.
pub trait ScalarModel {
    /// Evaluates the model at a given state and additive forcing offset.
    fn evaluate(&self, state: f64, forcing: f64) -> f64;
}

impl<F> ScalarModel for F
where
    F: Fn(f64, f64) -> f64,
{
    fn evaluate(&self, state: f64, forcing: f64) -> f64 {
        self(state, forcing)
    }
}
