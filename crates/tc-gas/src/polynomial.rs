//! Thermally perfect air with a quadratic `cp(T)`.

use crate::law::GasLaw;
use tc_core::Real;

/// Air with `cp = a + b·T + c·T²`.
///
/// Default coefficients pass through 1005 J/kg/K at 300 K, 1142 at 1000 K
/// and 1249 at 2000 K; valid roughly from 200 K to 2500 K.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolynomialAir {
    pub r: Real,
    pub a: Real,
    pub b: Real,
    pub c: Real,
}

impl Default for PolynomialAir {
    fn default() -> Self {
        Self {
            r: 287.05287,
            a: 930.630_252,
            b: 0.263_554_622,
            c: -5.218_487_4e-5,
        }
    }
}

impl GasLaw for PolynomialAir {
    fn r(&self) -> Real {
        self.r
    }

    fn cp(&self, t: Real) -> Real {
        self.a + t * (self.b + t * self.c)
    }

    fn enthalpy(&self, t: Real) -> Real {
        t * (self.a + t * (0.5 * self.b + t * self.c / 3.0))
    }
}
