//! International Standard Atmosphere and flight condition.

use crate::error::{ComponentError, ComponentResult};
use tc_core::units::constants::{P_ISA_SL, T_ISA_SL};
use tc_core::{FluidState, Real, variables};
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Component, SystemResult};

/// Temperature lapse rate of the troposphere (K/m).
pub const LAPSE_RATE: Real = 0.0065;

/// Tropopause altitude (m).
pub const TROPOPAUSE: Real = 11_000.0;

/// Standard gravity (m/s²).
const G0: Real = 9.806_65;

/// Upper bound of the model (m).
pub const MAX_ALTITUDE: Real = 20_000.0;

/// ISA static state at `altitude` (m): `(pressure, temperature)`.
///
/// Linear lapse up to the tropopause, isothermal above.
pub fn isa_static(altitude: Real, r: Real) -> ComponentResult<(Real, Real)> {
    if !(-500.0..=MAX_ALTITUDE).contains(&altitude) {
        return Err(ComponentError::Domain {
            what: "altitude",
            value: altitude,
        });
    }
    let exponent = G0 / (LAPSE_RATE * r);
    let t11 = T_ISA_SL - LAPSE_RATE * TROPOPAUSE;
    if altitude <= TROPOPAUSE {
        let t = T_ISA_SL - LAPSE_RATE * altitude;
        Ok((P_ISA_SL * (t / T_ISA_SL).powf(exponent), t))
    } else {
        let p11 = P_ISA_SL * (t11 / T_ISA_SL).powf(exponent);
        let p = p11 * (-G0 / (r * t11) * (altitude - TROPOPAUSE)).exp();
        Ok((p, t11))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AtmosphereInputs {
    /// Geopotential altitude (m)
    pub altitude: Real,
    pub mach: Real,
    /// Captured mass flow (kg/s)
    pub w: Real,
}

impl Default for AtmosphereInputs {
    fn default() -> Self {
        Self {
            altitude: 0.0,
            mach: 0.0,
            w: 1.0,
        }
    }
}

variables!(AtmosphereInputs { altitude, mach, w });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AtmosphereOutputs {
    /// Free-stream total state carrying `w`
    pub fl_out: FluidState,
    /// Ambient static pressure (Pa)
    pub pamb: Real,
    /// Ambient static temperature (K)
    pub tamb: Real,
    /// Ambient density (kg/m³)
    pub rho: Real,
    /// Flight speed (m/s)
    pub speed: Real,
}

variables!(AtmosphereOutputs { pamb, tamb, rho, speed } nested { fl_out });

#[derive(Clone, Debug)]
pub struct Atmosphere<G: GasLaw = IdealDryAir> {
    name: String,
    gas: G,
    pub inputs: AtmosphereInputs,
}

impl Atmosphere<IdealDryAir> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_gas(name, IdealDryAir::default())
    }
}

impl<G: GasLaw> Atmosphere<G> {
    pub fn with_gas(name: impl Into<String>, gas: G) -> Self {
        Self {
            name: name.into(),
            gas,
            inputs: AtmosphereInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<AtmosphereOutputs> {
        let i = &self.inputs;
        if i.mach.is_nan() || i.mach < 0.0 {
            return Err(ComponentError::Domain {
                what: "flight mach",
                value: i.mach,
            });
        }
        let (pamb, tamb) = isa_static(i.altitude, self.gas.r())?;
        let gamma = self.gas.gamma(tamb);
        let tt = tamb * (1.0 + 0.5 * (gamma - 1.0) * i.mach * i.mach);
        let pt = pamb * (tt / tamb).powf(gamma / (gamma - 1.0));

        Ok(AtmosphereOutputs {
            fl_out: FluidState::new(pt, tt, i.w),
            pamb,
            tamb,
            rho: self.gas.density(pamb, tamb)?,
            speed: i.mach * self.gas.speed_of_sound(tamb)?,
        })
    }
}

impl<G: GasLaw + 'static> Component for Atmosphere<G> {
    type Inputs = AtmosphereInputs;
    type Outputs = AtmosphereOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &AtmosphereInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut AtmosphereInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<AtmosphereOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const R: Real = 287.05287;

    #[test]
    fn sea_level_static() {
        let out = Atmosphere::new("atm").run().unwrap();
        assert_eq!(out.pamb, P_ISA_SL);
        assert_eq!(out.fl_out.pt, P_ISA_SL);
        assert_eq!(out.speed, 0.0);
        assert_relative_eq!(out.rho, 1.225, max_relative = 1e-3);
    }

    #[test]
    fn standard_table_points() {
        let (p, t) = isa_static(5000.0, R).unwrap();
        assert_relative_eq!(t, 255.65, max_relative = 1e-9);
        assert_relative_eq!(p, 54_019.9, max_relative = 1e-3);
        let (p, t) = isa_static(15_000.0, R).unwrap();
        assert_relative_eq!(t, 216.65, max_relative = 1e-9);
        assert_relative_eq!(p, 12_044.6, max_relative = 1e-3);
        assert!(isa_static(30_000.0, R).is_err());
    }

    #[test]
    fn ram_rise_in_flight() {
        let mut atm = Atmosphere::new("atm");
        atm.inputs.altitude = 11_000.0;
        atm.inputs.mach = 0.8;
        let out = atm.run().unwrap();
        assert_relative_eq!(out.fl_out.tt, 216.65 * 1.128, max_relative = 1e-9);
        assert_relative_eq!(out.fl_out.pt / out.pamb, 1.128f64.powf(3.5), max_relative = 1e-9);
        assert_relative_eq!(out.speed, 0.8 * (1.4 * R * 216.65).sqrt(), max_relative = 1e-9);
    }
}
