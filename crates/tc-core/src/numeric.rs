use crate::TcError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TcError::NonFinite { what, value: v })
    }
}

/// Strictly positive and finite (absolute temperatures, pressures, areas).
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, TcError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(TcError::NonPositive { what, value: v })
    }
}

/// Scale used to normalise a residual against its reference value.
pub fn reference_scale(v: Real) -> Real {
    v.abs().max(1.0)
}
