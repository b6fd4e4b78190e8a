//! Damped Newton iteration with bound clamping.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use nalgebra::DVector;
use tracing::{debug, warn};

/// Newton solver configuration.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance against the initial residual norm (0 disables)
    pub rel_tol: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Relative finite-difference step
    pub fd_epsilon: f64,
    /// Step fraction below which the iteration is considered stalled
    pub min_step: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-8,
            rel_tol: 0.0,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
            fd_epsilon: 1e-7,
            min_step: 1e-10,
        }
    }
}

/// Newton iteration result.
#[derive(Clone, Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
}

fn clamp(mut x: DVector<f64>, bounds: &[(f64, f64)]) -> DVector<f64> {
    for (xi, (lo, hi)) in x.iter_mut().zip(bounds) {
        *xi = xi.max(*lo).min(*hi);
    }
    x
}

/// Solve `residual_fn(x) = 0` from `x0`.
///
/// Each step solves `J dx = -r` by LU and backtracks by `line_search_beta`
/// until the residual norm decreases. Trial points where the residual
/// cannot be evaluated for a recoverable reason (a domain or convergence
/// failure inside the model) count as rejected steps. An error at the
/// initial point is returned as is.
pub fn newton_solve<F>(
    x0: DVector<f64>,
    bounds: &[(f64, f64)],
    mut residual_fn: F,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let mut x = clamp(x0, bounds);
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    if !r_norm.is_finite() {
        return Err(SolverError::Numeric {
            what: "non-finite residual at the initial point".to_string(),
        });
    }
    let r0_norm = r_norm;

    for iter in 0..config.max_iterations {
        debug!(iteration = iter, residual_norm = r_norm, "newton iteration");

        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
            });
        }

        let jac = finite_difference_jacobian(&x, &r, bounds, &mut residual_fn, config.fd_epsilon)?;

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-&r))
            .ok_or(SolverError::Singular { iteration: iter })?;
        if dx.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::Singular { iteration: iter });
        }

        let mut alpha = 1.0;
        let mut accepted = None;
        let mut last_ok = None;
        let mut last_err = None;

        for _ in 0..config.max_line_search_iters {
            let x_trial = clamp(&x + alpha * &dx, bounds);
            match residual_fn(&x_trial) {
                Ok(r_trial) => {
                    let n = r_trial.norm();
                    if n.is_finite() && n < r_norm {
                        accepted = Some((x_trial, r_trial, n));
                        break;
                    }
                    last_ok = n.is_finite().then_some((x_trial, r_trial, n));
                    last_err = None;
                }
                Err(e) if e.is_recoverable() => {
                    debug!(alpha, error = %e, "trial point rejected");
                    last_ok = None;
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
            alpha *= config.line_search_beta;
        }

        match accepted.or(last_ok) {
            Some((x_new, r_new, n)) => {
                x = x_new;
                r = r_new;
                r_norm = n;
            }
            None => {
                let cause = last_err.map_or_else(|| "no finite trial point".to_string(), |e| e.to_string());
                warn!(iteration = iter, %cause, "line search failed");
                return Err(SolverError::ConvergenceFailed {
                    what: format!("Line search failed at iteration {iter}: {cause}"),
                });
            }
        }

        if alpha < config.min_step {
            return Err(SolverError::ConvergenceFailed {
                what: format!("Line search stagnated at iteration {iter}"),
            });
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "Maximum iterations {} reached, residual = {}",
            config.max_iterations, r_norm
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_system::SystemError;

    fn domain() -> SolverError {
        SolverError::System(SystemError::Domain {
            system: "quadratic".into(),
            what: "outside".into(),
        })
    }

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0, x > 0
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        };

        let x0 = DVector::from_element(1, 3.0);
        let result = newton_solve(x0, &[], residual, &NewtonConfig::default()).unwrap();

        assert!((result.x[0] - 2.0).abs() < 1e-8);
        assert!(result.iterations > 0);
    }

    #[test]
    fn converged_start_takes_no_iteration() {
        let residual =
            |x: &DVector<f64>| -> SolverResult<DVector<f64>> { Ok(x.map(|v| v - 1.0)) };
        let x0 = DVector::from_element(2, 1.0);
        let result = newton_solve(x0, &[], residual, &NewtonConfig::default()).unwrap();
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn bounds_select_the_root() {
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        };
        let x0 = DVector::from_element(1, -3.0);
        let free = newton_solve(x0.clone(), &[], residual, &NewtonConfig::default()).unwrap();
        assert!((free.x[0] + 2.0).abs() < 1e-8);

        let bounded =
            newton_solve(x0, &[(1.0, f64::INFINITY)], residual, &NewtonConfig::default()).unwrap();
        assert!((bounded.x[0] - 2.0).abs() < 1e-8);
    }

    #[test]
    fn recoverable_errors_shorten_the_step() {
        // 1/x - 0.25 = 0, only defined for x > 0
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[0] <= 0.0 {
                return Err(domain());
            }
            Ok(DVector::from_element(1, 1.0 / x[0] - 0.25))
        };
        // Newton on 1/x - 0.25 from x0 = 10 steps to x = 10 - 100 * 0.15 = -5
        let x0 = DVector::from_element(1, 10.0);
        let result = newton_solve(x0, &[], residual, &NewtonConfig::default()).unwrap();
        assert!((result.x[0] - 4.0).abs() < 1e-6);
    }

    #[test]
    fn initial_point_error_is_propagated() {
        let residual = |_: &DVector<f64>| -> SolverResult<DVector<f64>> { Err(domain()) };
        let err = newton_solve(
            DVector::from_element(1, 1.0),
            &[],
            residual,
            &NewtonConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::System(SystemError::Domain { .. })));
    }

    #[test]
    fn singular_jacobian_is_reported() {
        // Residual independent of x
        let residual =
            |_: &DVector<f64>| -> SolverResult<DVector<f64>> { Ok(DVector::from_element(1, 1.0)) };
        let err = newton_solve(
            DVector::from_element(1, 1.0),
            &[],
            residual,
            &NewtonConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::Singular { iteration: 0 }));
    }
}
