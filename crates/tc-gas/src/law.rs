//! The `GasLaw` contract.

use crate::error::{GasError, GasResult};
use tc_core::{Real, ensure_finite, ensure_positive};

/// Default relative tolerance of the temperature-from-enthalpy inversion.
pub const DEFAULT_T_TOL: Real = 1e-8;

/// Iteration budget of the temperature-from-enthalpy inversion.
pub const MAX_T_ITERATIONS: usize = 50;

/// Property relations of a thermally perfect gas.
///
/// Implementors provide the gas constant, `cp(T)` and a consistent `h(T)`;
/// everything else has a default built on those three.
pub trait GasLaw: Clone + std::fmt::Debug + Send + Sync {
    /// Specific gas constant (J/kg/K)
    fn r(&self) -> Real;

    /// Specific heat at constant pressure (J/kg/K)
    fn cp(&self, t: Real) -> Real;

    /// Specific enthalpy (J/kg), zero at 0 K.
    fn enthalpy(&self, t: Real) -> Real;

    /// Heat capacity ratio.
    fn gamma(&self, t: Real) -> Real {
        let cp = self.cp(t);
        cp / (cp - self.r())
    }

    /// Invert `enthalpy` with Newton's method.
    ///
    /// Stops when the temperature step is below `tol` relative to the
    /// current temperature. Fails with [`GasError::Convergence`] when the
    /// iteration budget is spent and with [`GasError::Domain`] when the
    /// root is not a positive absolute temperature.
    fn temperature_from_enthalpy(&self, h: Real, tol: Real) -> GasResult<Real> {
        ensure_finite(h, "enthalpy")?;
        let mut t = (h / self.cp(300.0)).max(1.0);
        let mut step = Real::INFINITY;

        for _ in 0..MAX_T_ITERATIONS {
            let cp = self.cp(t);
            step = (self.enthalpy(t) - h) / cp;
            t -= step;
            ensure_finite(t, "temperature")?;
            if step.abs() <= tol * t.abs() {
                return Ok(ensure_positive(t, "temperature")?);
            }
        }

        Err(GasError::Convergence {
            what: "temperature from enthalpy",
            iterations: MAX_T_ITERATIONS,
            last_step: step,
        })
    }

    /// Density from pressure (Pa) and temperature (K): `p / (R T)`.
    fn density(&self, p: Real, t: Real) -> GasResult<Real> {
        let p = ensure_positive(p, "pressure")?;
        let t = ensure_positive(t, "temperature")?;
        Ok(p / (self.r() * t))
    }

    /// Total-to-total pressure ratio of a polytropic process from `t_in` to `t_out`.
    ///
    /// The branch follows the sign of the temperature change:
    ///
    /// ```text
    /// compression (t_out >= t_in): pr = (t_out/t_in)^(γ·η / (γ-1))
    /// expansion   (t_out <  t_in): pr = (t_out/t_in)^(γ / ((γ-1)·η))
    /// ```
    ///
    /// with γ evaluated at the mean temperature.
    fn pressure_ratio(&self, t_in: Real, t_out: Real, eff_poly: Real) -> GasResult<Real> {
        let t_in = ensure_positive(t_in, "inlet temperature")?;
        let t_out = ensure_positive(t_out, "outlet temperature")?;
        let eff = ensure_positive(eff_poly, "polytropic efficiency")?;

        let gamma = self.gamma(0.5 * (t_in + t_out));
        let exponent = if t_out >= t_in {
            gamma * eff / (gamma - 1.0)
        } else {
            gamma / ((gamma - 1.0) * eff)
        };
        Ok(ensure_finite((t_out / t_in).powf(exponent), "pressure ratio")?)
    }

    /// Speed of sound (m/s) at static temperature `t`.
    fn speed_of_sound(&self, t: Real) -> GasResult<Real> {
        let t = ensure_positive(t, "temperature")?;
        Ok((self.gamma(t) * self.r() * t).sqrt())
    }

    /// Static temperature at `mach`, γ taken at the total temperature.
    fn static_temperature(&self, tt: Real, mach: Real) -> GasResult<Real> {
        let tt = ensure_positive(tt, "total temperature")?;
        let gamma = self.gamma(tt);
        Ok(tt / (1.0 + 0.5 * (gamma - 1.0) * mach * mach))
    }

    /// Static pressure at `mach`, isentropic from the total state.
    fn static_pressure(&self, pt: Real, tt: Real, mach: Real) -> GasResult<Real> {
        let pt = ensure_positive(pt, "total pressure")?;
        let gamma = self.gamma(ensure_positive(tt, "total temperature")?);
        let ratio = 1.0 + 0.5 * (gamma - 1.0) * mach * mach;
        Ok(pt / ratio.powf(gamma / (gamma - 1.0)))
    }

    /// Mach number of an isentropic expansion from `pt` to static `ps`.
    fn mach_from_pressure_ratio(&self, pt: Real, ps: Real, tt: Real) -> GasResult<Real> {
        let pt = ensure_positive(pt, "total pressure")?;
        let ps = ensure_positive(ps, "static pressure")?;
        if pt < ps {
            return Err(GasError::Domain {
                what: "total to static pressure ratio below one",
                value: pt / ps,
            });
        }
        let gamma = self.gamma(ensure_positive(tt, "total temperature")?);
        let m2 = 2.0 / (gamma - 1.0) * ((pt / ps).powf((gamma - 1.0) / gamma) - 1.0);
        Ok(m2.max(0.0).sqrt())
    }
}
