//! Calorically perfect dry air.

use crate::law::GasLaw;
use tc_core::Real;

/// Dry air with constant `cp` and γ.
///
/// `h = cp·T` so the enthalpy inversion is exact in one Newton step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealDryAir {
    /// Specific gas constant (J/kg/K)
    pub r: Real,
    /// Heat capacity ratio
    pub gamma: Real,
}

impl Default for IdealDryAir {
    fn default() -> Self {
        Self {
            r: 287.05287,
            gamma: 1.4,
        }
    }
}

impl GasLaw for IdealDryAir {
    fn r(&self) -> Real {
        self.r
    }

    fn cp(&self, _t: Real) -> Real {
        self.r * self.gamma / (self.gamma - 1.0)
    }

    fn enthalpy(&self, t: Real) -> Real {
        self.cp(t) * t
    }

    fn gamma(&self, _t: Real) -> Real {
        self.gamma
    }
}
