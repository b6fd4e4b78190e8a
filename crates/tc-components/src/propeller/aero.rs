//! Propeller disk aerodynamics.

use crate::common::{blade_speed, check_positive, flow_coefficient};
use crate::error::ComponentResult;
use std::f64::consts::PI;
use tc_core::{FluidState, Real, ShaftState, units, variables};
use tc_gas::{DEFAULT_T_TOL, GasLaw, IdealDryAir};
use tc_system::{Component, DesignMethod, Equation, INTRINSIC, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct PropellerAeroInputs {
    pub fl_in: FluidState,
    pub sh_in: ShaftState,
    /// Propeller radius (m)
    pub radius: Real,
    /// Disk area (m²)
    pub inlet_area: Real,
    pub eff_poly: Real,
    /// Flow coefficient at zero load
    pub phi_p: Real,
    /// Design rotational speed (rpm)
    pub xnd: Real,
}

impl Default for PropellerAeroInputs {
    fn default() -> Self {
        Self {
            fl_in: FluidState::new(101_325.0, 288.15, 2200.0),
            sh_in: ShaftState::new(1200.0, 3.0e6),
            radius: 2.5,
            inlet_area: PI * (2.5 * 2.5 - 0.25 * 0.25),
            eff_poly: 0.85,
            phi_p: 0.3,
            xnd: 1200.0,
        }
    }
}

variables!(PropellerAeroInputs {
    radius, inlet_area, eff_poly, phi_p, xnd
} nested { fl_in, sh_in });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropellerAeroOutputs {
    pub fl_out: FluidState,
    /// Tip speed (m/s)
    pub utip: Real,
    pub phi: Real,
    pub psi: Real,
    pub eps_psi: Real,
    pub pr: Real,
    pub tr: Real,
    /// Rotational speed in percent of design
    pub pcnr: Real,
    /// Absorbed power (hp)
    pub power: Real,
    /// Thrust from the pressure rise across the disk (N)
    pub thrust: Real,
}

variables!(PropellerAeroOutputs {
    utip, phi, psi, eps_psi, pr, tr, pcnr, power, thrust
} nested { fl_out });

/// Propeller aero model.
///
/// ```text
/// phi     = vm / utip
/// psi     = 1 - phi / phi_p
/// eps_psi = dh / utip^2 - psi
/// thrust  = inlet_area * pt_in * (pr - 1)
/// ```
#[derive(Clone, Debug)]
pub struct PropellerAero<G: GasLaw = IdealDryAir> {
    name: String,
    gas: G,
    pub inputs: PropellerAeroInputs,
}

impl PropellerAero<IdealDryAir> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_gas(name, IdealDryAir::default())
    }
}

impl<G: GasLaw> PropellerAero<G> {
    pub fn with_gas(name: impl Into<String>, gas: G) -> Self {
        Self {
            name: name.into(),
            gas,
            inputs: PropellerAeroInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<PropellerAeroOutputs> {
        let i = &self.inputs;
        let w = check_positive(i.fl_in.w, "mass flow")?;
        let tt_in = check_positive(i.fl_in.tt, "inlet total temperature")?;

        let dh = i.sh_in.power / w;
        let tt_out = self
            .gas
            .temperature_from_enthalpy(self.gas.enthalpy(tt_in) + dh, DEFAULT_T_TOL)?;
        let pr = self.gas.pressure_ratio(tt_in, tt_out, i.eff_poly)?;

        let utip = blade_speed(i.sh_in.n, i.radius)?;
        let rho = self.gas.density(i.fl_in.pt, tt_in)?;
        let phi = flow_coefficient(w, rho, i.inlet_area, utip)?;
        let psi = 1.0 - phi / check_positive(i.phi_p, "phi_p")?;

        Ok(PropellerAeroOutputs {
            fl_out: FluidState::new(i.fl_in.pt * pr, tt_out, w),
            utip,
            phi,
            psi,
            eps_psi: dh / (utip * utip) - psi,
            pr,
            tr: tt_out / tt_in,
            pcnr: 100.0 * i.sh_in.n / check_positive(i.xnd, "design speed")?,
            power: units::watt_to_hp(i.sh_in.power),
            thrust: i.inlet_area * i.fl_in.pt * (pr - 1.0),
        })
    }
}

impl<G: GasLaw + 'static> Component for PropellerAero<G> {
    type Inputs = PropellerAeroInputs;
    type Outputs = PropellerAeroOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &PropellerAeroInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut PropellerAeroInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<PropellerAeroOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }

    fn intrinsic(&self) -> DesignMethod {
        DesignMethod::new(INTRINSIC)
            .unknown("fl_in.w")
            .equation(Equation::zero("eps_psi"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn design_speed_is_one_hundred_percent() {
        let out = PropellerAero::new("prop").run().unwrap();
        assert_relative_eq!(out.pcnr, 100.0);
        assert_relative_eq!(out.utip, 1200.0 * PI / 30.0 * 2.5, max_relative = 1e-12);
        assert!(out.thrust > 0.0);
    }

    #[test]
    fn thrust_is_positive_when_pressure_rises() {
        let prop = PropellerAero::new("prop");
        let out = prop.run().unwrap();
        assert!(out.pr > 1.0);
        let i = &prop.inputs;
        assert_relative_eq!(out.thrust, i.inlet_area * i.fl_in.pt * (out.pr - 1.0), max_relative = 1e-12);
    }

    #[test]
    fn power_reported_in_horsepower() {
        let out = PropellerAero::new("prop").run().unwrap();
        // 1 hp = 745.699872 W
        assert_relative_eq!(out.power, 3.0e6 / 745.699_872, max_relative = 1e-6);
    }
}
