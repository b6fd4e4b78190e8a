//! Simulation runner and result recording.

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta, four `rhs` calls per step.
    #[default]
    RK4,
    /// 1st-order explicit Euler, one `rhs` call per step.
    ForwardEuler,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Fixed time step (s)
    pub dt: f64,
    /// Final time (s)
    pub t_end: f64,
    /// Safety limit on the number of steps
    pub max_steps: usize,
    /// Record every N-th step
    pub record_every: usize,
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-2,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 1,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidArg { what: "dt must be positive" });
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(SimError::InvalidArg { what: "t_end must be non-negative" });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg { what: "max_steps must be positive" });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg { what: "record_every must be positive" });
        }
        Ok(())
    }

    /// Steps needed to reach `t_end`, ignoring `max_steps`.
    fn steps_to_end(&self) -> usize {
        // Tolerate the rounding of t_end / dt when dt divides t_end.
        (self.t_end / self.dt - 1e-9).ceil().max(0.0) as usize
    }

    /// Number of steps to reach `t_end`, capped by `max_steps`.
    pub fn step_count(&self) -> usize {
        self.steps_to_end().min(self.max_steps)
    }

    /// Start and end time of step `step` (1-based) out of `steps`.
    ///
    /// The step that reaches `t_end` ends exactly on it, so it is shorter
    /// than `dt` when `dt` does not divide `t_end`.
    fn step_span(&self, step: usize, steps: usize) -> (f64, f64) {
        let t0 = (step - 1) as f64 * self.dt;
        let t1 = if step == steps && steps == self.steps_to_end() {
            self.t_end
        } else {
            step as f64 * self.dt
        };
        (t0, t1)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimRecord<S> {
    /// Recorded times (s)
    pub t: Vec<f64>,
    /// State at each recorded time
    pub x: Vec<S>,
}

impl<S> SimRecord<S> {
    pub fn last(&self) -> Option<(f64, &S)> {
        self.t.last().copied().zip(self.x.last())
    }
}

/// Integrate `model` from 0 to `opts.t_end` with a fixed step.
///
/// Times are `k * dt` except the last, which is `t_end` unless `max_steps`
/// stopped the run first. The initial and final states are always recorded;
/// in between every `record_every`-th step is kept.
pub fn run_sim<M: TransientModel>(model: &mut M, opts: &SimOptions) -> SimResult<SimRecord<M::State>> {
    opts.validate()?;
    let steps = opts.step_count();

    let mut x = model.initial_state();
    let mut record = SimRecord {
        t: vec![0.0],
        x: vec![x.clone()],
    };

    for step in 1..=steps {
        let (t0, t1) = opts.step_span(step, steps);
        let h = t1 - t0;
        x = match opts.integrator {
            IntegratorType::RK4 => RK4.step(model, t0, &x, h)?,
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t0, &x, h)?,
        };
        if step % opts.record_every == 0 || step == steps {
            debug!(step, t = t1, "record");
            record.t.push(t1);
            record.x.push(x.clone());
        }
    }

    info!(steps, recorded = record.t.len(), "simulation finished");
    Ok(record)
}
