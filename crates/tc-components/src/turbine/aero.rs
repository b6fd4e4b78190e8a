//! Turbine stage-stack aerodynamics.

use crate::common::{blade_speed, check_finite, check_positive, flow_coefficient, load_coefficient};
use crate::error::ComponentResult;
use tc_core::units::constants::T_ISA_SL;
use tc_core::{FluidState, Real, ShaftState, variables};
use tc_gas::{DEFAULT_T_TOL, GasLaw, IdealDryAir};
use tc_system::{Component, DesignMethod, Equation, INTRINSIC, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct TurbineAeroInputs {
    pub fl_in: FluidState,
    /// Shaft speed (rpm)
    pub n: Real,
    /// Specific work extracted (J/kg)
    pub dh: Real,
    pub eff_poly: Real,
    /// Flow coefficient at unit map load coefficient
    pub phi_p: Real,
    pub stage_count: Real,
    pub mean_radius: Real,
    pub area_in: Real,
    /// Design corrected speed (rpm)
    pub ncdes: Real,
}

impl Default for TurbineAeroInputs {
    fn default() -> Self {
        Self {
            fl_in: FluidState::new(1.0e6, 1500.0, 10.0),
            n: 10_000.0,
            dh: 1.0e5,
            eff_poly: 0.9,
            phi_p: 1.0,
            stage_count: 1.0,
            mean_radius: 0.5,
            area_in: 0.1,
            ncdes: 10_000.0,
        }
    }
}

variables!(TurbineAeroInputs {
    n, dh, eff_poly, phi_p, stage_count, mean_radius, area_in, ncdes
} nested { fl_in });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurbineAeroOutputs {
    pub fl_out: FluidState,
    pub sh_out: ShaftState,
    /// Total pressure ratio, below one
    pub pr: Real,
    pub phi: Real,
    pub psi: Real,
    pub psi_map: Real,
    pub eps_psi: Real,
    /// Total temperature drop (K)
    pub delta_tt: Real,
    /// Corrected speed (rpm)
    pub nc: Real,
    /// Corrected speed in percent of design
    pub ncqdes: Real,
}

variables!(TurbineAeroOutputs {
    pr, phi, psi, psi_map, eps_psi, delta_tt, nc, ncqdes
} nested { fl_out, sh_out });

/// Turbine aero model.
///
/// The specific work `dh` is an input; the outlet state follows from the
/// gas law on the expansion branch and the shaft delivers `w * dh`. The map
/// is linear through the origin, `psi_map = phi / phi_p`, evaluated at the
/// mean radius.
#[derive(Clone, Debug)]
pub struct TurbineAero<G: GasLaw = IdealDryAir> {
    name: String,
    gas: G,
    pub inputs: TurbineAeroInputs,
}

impl TurbineAero<IdealDryAir> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_gas(name, IdealDryAir::default())
    }
}

impl<G: GasLaw> TurbineAero<G> {
    pub fn with_gas(name: impl Into<String>, gas: G) -> Self {
        Self {
            name: name.into(),
            gas,
            inputs: TurbineAeroInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<TurbineAeroOutputs> {
        let i = &self.inputs;
        let w = check_positive(i.fl_in.w, "mass flow")?;
        let tt_in = check_positive(i.fl_in.tt, "inlet total temperature")?;

        let tt_out = self
            .gas
            .temperature_from_enthalpy(self.gas.enthalpy(tt_in) - i.dh, DEFAULT_T_TOL)?;
        let pr = self.gas.pressure_ratio(tt_in, tt_out, i.eff_poly)?;

        let u = blade_speed(i.n, i.mean_radius)?;
        let rho = self.gas.density(i.fl_in.pt, tt_in)?;
        let phi = flow_coefficient(w, rho, i.area_in, u)?;
        let psi = load_coefficient(i.dh, i.stage_count, u)?;
        let psi_map = phi / check_positive(i.phi_p, "phi_p")?;

        let nc = i.n / (tt_in / T_ISA_SL).sqrt();
        let ncqdes = check_finite(100.0 * nc / check_positive(i.ncdes, "design corrected speed")?, "ncqdes")?;

        Ok(TurbineAeroOutputs {
            fl_out: FluidState::new(i.fl_in.pt * pr, tt_out, w),
            sh_out: ShaftState::new(i.n, w * i.dh),
            pr,
            phi,
            psi,
            psi_map,
            eps_psi: psi - psi_map,
            delta_tt: tt_in - tt_out,
            nc,
            ncqdes,
        })
    }
}

impl<G: GasLaw + 'static> Component for TurbineAero<G> {
    type Inputs = TurbineAeroInputs;
    type Outputs = TurbineAeroOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &TurbineAeroInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut TurbineAeroInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<TurbineAeroOutputs> {
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
    fn expansion_extracts_work() {
        let t = TurbineAero::new("aero");
        let out = t.run().unwrap();
        assert!(out.pr < 1.0);
        assert_relative_eq!(out.delta_tt, 1.0e5 / 1004.685045, max_relative = 1e-6);
        assert_relative_eq!(out.sh_out.power, 10.0 * 1.0e5);
        assert_eq!(out.sh_out.n, 10_000.0);
        assert_eq!(out.fl_out.w, 10.0);
    }

    #[test]
    fn corrected_speed_at_reference_temperature() {
        let mut t = TurbineAero::new("aero");
        t.inputs.fl_in.tt = T_ISA_SL;
        t.inputs.dh = 1.0e4;
        let out = t.run().unwrap();
        assert_relative_eq!(out.nc, 10_000.0, max_relative = 1e-12);
        assert_relative_eq!(out.ncqdes, 100.0, max_relative = 1e-12);
    }

    #[test]
    fn extracting_more_than_the_stream_holds_fails() {
        let mut t = TurbineAero::new("aero");
        t.inputs.dh = 2.0e6;
        assert!(t.run().is_err());
    }
}
