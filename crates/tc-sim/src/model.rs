//! Transient models and their integrable state.

use crate::error::SimResult;
use tc_core::Real;

/// State that can be advanced along a rate: `x + h * rate`.
pub trait State: Clone {
    fn advanced(&self, rate: &Self, h: f64) -> Self;
}

impl State for Real {
    fn advanced(&self, rate: &Real, h: f64) -> Real {
        self + h * rate
    }
}

/// One entry per transient variable.
impl State for Vec<Real> {
    fn advanced(&self, rate: &Vec<Real>, h: f64) -> Vec<Real> {
        self.iter().zip(rate).map(|(x, r)| x + h * r).collect()
    }
}

/// `dx/dt = f(t, x)`.
pub trait TransientModel {
    type State: State;

    /// State at t = 0.
    fn initial_state(&self) -> Self::State;

    /// Rate of the state at `(t, x)`.
    ///
    /// `&mut self` lets a model keep its last algebraic solution as the
    /// starting point of the next one.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;
}
