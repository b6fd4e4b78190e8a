//! Solve entry points.

use crate::error::{SolverError, SolverResult};
use crate::newton::{NewtonConfig, newton_solve};
use crate::problem::Problem;
use nalgebra::DVector;
use tc_core::Real;
use tc_system::{Snapshot, System};
use tracing::{info, warn};

/// Converged state of a solve.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Canonical path and converged value of each unknown
    pub unknowns: Vec<(String, Real)>,
    pub residual_norm: Real,
    pub iterations: usize,
    /// Full snapshot of the system at the solution
    pub snapshot: Snapshot,
}

impl Solution {
    pub fn value(&self, path: &str) -> Option<Real> {
        self.snapshot.get(path)
    }
}

/// Newton solver bound to a configuration.
#[derive(Clone, Debug, Default)]
pub struct NonLinearSolver {
    pub config: NewtonConfig,
}

impl NonLinearSolver {
    pub fn new(config: NewtonConfig) -> Self {
        Self { config }
    }

    /// Drive `system` to satisfy `problem`.
    ///
    /// On success the unknowns hold their converged values in `system`. On
    /// failure they are restored to their starting values.
    pub fn solve(&self, system: &mut dyn System, problem: &Problem) -> SolverResult<Solution> {
        let built = problem.build(system)?;
        let name = system.name().to_string();

        let mut x0 = DVector::zeros(built.len());
        for (i, u) in built.unknowns().iter().enumerate() {
            x0[i] = system
                .read_input(&u.var)
                .ok_or_else(|| SolverError::Structural {
                    what: format!("unknown `{}` is not a free input", u.var),
                })?;
        }

        if built.is_empty() {
            let snapshot = system.compute()?;
            return Ok(Solution {
                unknowns: Vec::new(),
                residual_norm: 0.0,
                iterations: 0,
                snapshot,
            });
        }

        let bounds = built.bounds();
        let result = {
            let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
                for (u, v) in built.unknowns().iter().zip(x.iter()) {
                    system.set(&u.var, *v)?;
                }
                let snap = system.compute()?;
                built.residuals(&snap)
            };
            newton_solve(x0.clone(), &bounds, residual, &self.config)
        };

        let (x, outcome) = match result {
            Ok(r) => (r.x.clone(), Ok(r)),
            Err(e) => (x0, Err(e)),
        };
        for (u, v) in built.unknowns().iter().zip(x.iter()) {
            system.set(&u.var, *v)?;
        }

        let result = match outcome {
            Ok(r) => r,
            Err(e) => {
                warn!(system = %name, error = %e, "solve failed");
                return Err(e);
            }
        };

        let snapshot = system.compute()?;
        info!(
            system = %name,
            iterations = result.iterations,
            residual_norm = result.residual_norm,
            "converged"
        );

        Ok(Solution {
            unknowns: built
                .unknowns()
                .iter()
                .map(|u| u.var.clone())
                .zip(result.x.iter().copied())
                .collect(),
            residual_norm: result.residual_norm,
            iterations: result.iterations,
            snapshot,
        })
    }
}

/// Solve with the default configuration.
pub fn solve(system: &mut dyn System, problem: &Problem) -> SolverResult<Solution> {
    NonLinearSolver::default().solve(system, problem)
}
