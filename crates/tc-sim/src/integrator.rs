//! Explicit fixed-step integrators.

use crate::error::SimResult;
use crate::model::{State, TransientModel};

pub trait Integrator {
    /// State at `t + h` from the state `x` at `t`.
    fn step<M: TransientModel>(&self, model: &mut M, t: f64, x: &M::State, h: f64) -> SimResult<M::State>;
}

/// Explicit Runge-Kutta scheme whose stage `i` evaluates the rate at
/// `x + c[i] h k[i-1]` (a diagonal Butcher tableau).
fn diagonal_rk<M: TransientModel>(
    model: &mut M,
    nodes: &[f64],
    weights: &[f64],
    t: f64,
    x: &M::State,
    h: f64,
) -> SimResult<M::State> {
    let mut next = x.clone();
    let mut k: Option<M::State> = None;
    for (&c, &b) in nodes.iter().zip(weights) {
        let stage = match &k {
            Some(k) => x.advanced(k, c * h),
            None => x.clone(),
        };
        let rate = model.rhs(t + c * h, &stage)?;
        next = next.advanced(&rate, b * h);
        k = Some(rate);
    }
    Ok(next)
}

/// Classical fourth-order Runge-Kutta, four rate evaluations per step.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl RK4 {
    const NODES: [f64; 4] = [0.0, 0.5, 0.5, 1.0];
    const WEIGHTS: [f64; 4] = [1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0];
}

impl Integrator for RK4 {
    fn step<M: TransientModel>(&self, model: &mut M, t: f64, x: &M::State, h: f64) -> SimResult<M::State> {
        diagonal_rk(model, &Self::NODES, &Self::WEIGHTS, t, x, h)
    }
}

/// Explicit Euler, one rate evaluation per step.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(&self, model: &mut M, t: f64, x: &M::State, h: f64) -> SimResult<M::State> {
        diagonal_rk(model, &[0.0], &[1.0], t, x, h)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// dx/dt = -x, x(0) = 1.
    pub(crate) struct Decay {
        pub calls: usize,
    }

    impl TransientModel for Decay {
        type State = f64;

        fn initial_state(&self) -> f64 {
            1.0
        }

        fn rhs(&mut self, _t: f64, x: &f64) -> SimResult<f64> {
            self.calls += 1;
            Ok(-x)
        }
    }

    /// dx/dt = t, x(0) = 0: exact for any scheme of order two or more.
    struct Ramp;

    impl TransientModel for Ramp {
        type State = f64;

        fn initial_state(&self) -> f64 {
            0.0
        }

        fn rhs(&mut self, t: f64, _x: &f64) -> SimResult<f64> {
            Ok(t)
        }
    }

    #[test]
    fn euler_step_is_linear() {
        let mut m = Decay { calls: 0 };
        let x = ForwardEuler.step(&mut m, 0.0, &1.0, 0.1).unwrap();
        assert_relative_eq!(x, 0.9);
        assert_eq!(m.calls, 1);
    }

    #[test]
    fn rk4_matches_the_exponential() {
        let mut m = Decay { calls: 0 };
        let mut x = 1.0;
        for i in 0..10 {
            x = RK4.step(&mut m, i as f64 * 0.1, &x, 0.1).unwrap();
        }
        assert_relative_eq!(x, (-1.0f64).exp(), max_relative = 1e-6);
        assert_eq!(m.calls, 40);
    }

    #[test]
    fn rk4_samples_the_stage_times() {
        let x = RK4.step(&mut Ramp, 1.0, &0.0, 0.5).unwrap();
        // integral of t from 1 to 1.5
        assert_relative_eq!(x, 0.625, max_relative = 1e-12);
        let x = ForwardEuler.step(&mut Ramp, 1.0, &0.0, 0.5).unwrap();
        assert_relative_eq!(x, 0.5, max_relative = 1e-12);
    }

    #[test]
    fn vector_state_advances_per_entry() {
        let x = vec![1.0, 2.0];
        assert_eq!(x.advanced(&vec![0.5, -1.0], 2.0), vec![2.0, 0.0]);
    }
}
