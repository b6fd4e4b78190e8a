//! Finite difference Jacobian computation.

use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};
use tracing::trace;

/// Compute the Jacobian by one-sided finite differences around `x`.
///
/// Column `j` perturbs `x[j]` by `epsilon * max(|x[j]|, 1)`. The forward
/// difference is used unless it would cross the upper bound or the residual
/// cannot be evaluated there, in which case the backward difference is
/// taken instead.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    bounds: &[(f64, f64)],
    f: &mut F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let n = x.len();
    let m = f_x.len();
    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let dx = epsilon * x[j].abs().max(1.0);
        let upper = bounds.get(j).map_or(f64::INFINITY, |b| b.1);

        let mut forward = None;
        if x[j] + dx <= upper {
            let mut x_plus = x.clone();
            x_plus[j] += dx;
            match f(&x_plus) {
                Ok(f_plus) => forward = Some((f_plus - f_x) / dx),
                Err(e) if e.is_recoverable() => {
                    trace!(column = j, error = %e, "forward difference failed, using backward");
                }
                Err(e) => return Err(e),
            }
        }

        let df = match forward {
            Some(df) => df,
            None => {
                let mut x_minus = x.clone();
                x_minus[j] -= dx;
                (f_x - f(&x_minus)?) / dx
            }
        };
        jac.set_column(j, &df);
    }

    Ok(jac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use tc_system::SystemError;

    #[test]
    fn jacobian_quadratic() {
        // f(x) = x^2, J = 2*x
        let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let fx = f(&x).unwrap();
        let jac = finite_difference_jacobian(&x, &fx, &[], &mut f, 1e-7).unwrap();

        assert!((jac[(0, 0)] - 6.0).abs() < 1e-5);
    }

    #[test]
    fn jacobian_two_by_two() {
        // f = (x0 * x1, x0 + 3 x1)
        let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![x[0] * x[1], x[0] + 3.0 * x[1]]))
        };
        let x = DVector::from_vec(vec![2.0, 5.0]);
        let fx = f(&x).unwrap();
        let jac = finite_difference_jacobian(&x, &fx, &[], &mut f, 1e-7).unwrap();

        assert!((jac[(0, 0)] - 5.0).abs() < 1e-5);
        assert!((jac[(0, 1)] - 2.0).abs() < 1e-5);
        assert!((jac[(1, 0)] - 1.0).abs() < 1e-5);
        assert!((jac[(1, 1)] - 3.0).abs() < 1e-5);
    }

    #[test]
    fn backward_difference_at_upper_bound() {
        // sqrt(1 - x) is undefined past x = 1
        let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[0] > 0.5 {
                return Err(SolverError::System(SystemError::Domain {
                    system: "edge".into(),
                    what: "past the edge".into(),
                }));
            }
            Ok(DVector::from_element(1, 4.0 * x[0]))
        };
        let x = DVector::from_element(1, 0.5);
        let fx = f(&x).unwrap();
        let jac = finite_difference_jacobian(&x, &fx, &[(0.0, 0.5)], &mut f, 1e-7).unwrap();
        assert!((jac[(0, 0)] - 4.0).abs() < 1e-5);

        // Same point without the bound: the forward difference fails, backward is used.
        let jac = finite_difference_jacobian(&x, &fx, &[], &mut f, 1e-7).unwrap();
        assert!((jac[(0, 0)] - 4.0).abs() < 1e-5);
    }
}
