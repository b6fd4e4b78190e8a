//! Compressor stage-stack aerodynamics.

use crate::common::{blade_speed, check_finite, check_positive, flow_coefficient, load_coefficient};
use crate::error::ComponentResult;
use tc_core::{FluidState, Real, ShaftState, variables};
use tc_gas::{DEFAULT_T_TOL, GasLaw, IdealDryAir};
use tc_system::{Component, DesignMethod, Equation, INTRINSIC, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct CompressorAeroInputs {
    pub fl_in: FluidState,
    pub sh_in: ShaftState,
    /// Polytropic efficiency
    pub eff_poly: Real,
    /// Flow coefficient at which the map load coefficient reaches zero
    pub phi_p: Real,
    pub stage_count: Real,
    pub tip_in_r: Real,
    pub tip_out_r: Real,
    pub inlet_area: Real,
}

impl Default for CompressorAeroInputs {
    fn default() -> Self {
        Self {
            fl_in: FluidState::default(),
            sh_in: ShaftState::default(),
            eff_poly: 0.9,
            phi_p: 0.4,
            stage_count: 1.0,
            tip_in_r: 0.5,
            tip_out_r: 0.5,
            inlet_area: 0.5,
        }
    }
}

variables!(CompressorAeroInputs {
    eff_poly, phi_p, stage_count, tip_in_r, tip_out_r, inlet_area
} nested { fl_in, sh_in });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompressorAeroOutputs {
    pub fl_out: FluidState,
    /// Total pressure ratio
    pub pr: Real,
    /// Total temperature ratio
    pub tr: Real,
    /// Specific work (J/kg)
    pub dh: Real,
    pub phi: Real,
    /// Load coefficient from the work balance
    pub psi: Real,
    /// Load coefficient read from the map
    pub psi_map: Real,
    pub eps_psi: Real,
    /// Inlet tip speed (m/s)
    pub utip: Real,
    /// Shaft speed echo (rpm)
    pub n: Real,
}

variables!(CompressorAeroOutputs {
    pr, tr, dh, phi, psi, psi_map, eps_psi, utip, n
} nested { fl_out });

/// Compressor aero model.
///
/// Shaft power sets the specific work, the gas law turns it into an outlet
/// temperature and a polytropic pressure ratio. The map is a straight line
/// in the (phi, psi) plane:
///
/// ```text
/// phi     = vm / u_in,           vm = W / (rho * inlet_area)
/// psi     = dh / (stages * u_out^2)
/// psi_map = 1 - phi / phi_p
/// eps_psi = psi - psi_map
/// ```
///
/// The intrinsic method frees the inlet mass flow to close `eps_psi`.
#[derive(Clone, Debug)]
pub struct CompressorAero<G: GasLaw = IdealDryAir> {
    name: String,
    gas: G,
    pub inputs: CompressorAeroInputs,
}

impl CompressorAero<IdealDryAir> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_gas(name, IdealDryAir::default())
    }
}

impl<G: GasLaw> CompressorAero<G> {
    pub fn with_gas(name: impl Into<String>, gas: G) -> Self {
        Self {
            name: name.into(),
            gas,
            inputs: CompressorAeroInputs::default(),
        }
    }

    pub fn gas(&self) -> &G {
        &self.gas
    }

    pub fn run(&self) -> ComponentResult<CompressorAeroOutputs> {
        let i = &self.inputs;
        let w = check_positive(i.fl_in.w, "mass flow")?;
        let tt_in = check_positive(i.fl_in.tt, "inlet total temperature")?;

        let dh = i.sh_in.power / w;
        let tt_out = self
            .gas
            .temperature_from_enthalpy(self.gas.enthalpy(tt_in) + dh, DEFAULT_T_TOL)?;
        let pr = self.gas.pressure_ratio(tt_in, tt_out, i.eff_poly)?;

        let u_in = blade_speed(i.sh_in.n, i.tip_in_r)?;
        let u_out = blade_speed(i.sh_in.n, i.tip_out_r)?;
        let rho = self.gas.density(i.fl_in.pt, tt_in)?;
        let phi = flow_coefficient(w, rho, i.inlet_area, u_in)?;
        let psi = load_coefficient(dh, i.stage_count, u_out)?;
        let phi_p = check_positive(i.phi_p, "phi_p")?;
        let psi_map = 1.0 - phi / phi_p;

        Ok(CompressorAeroOutputs {
            fl_out: FluidState::new(check_finite(i.fl_in.pt * pr, "outlet pressure")?, tt_out, w),
            pr,
            tr: tt_out / tt_in,
            dh,
            phi,
            psi,
            psi_map,
            eps_psi: psi - psi_map,
            utip: u_in,
            n: i.sh_in.n,
        })
    }
}

impl<G: GasLaw + 'static> Component for CompressorAero<G> {
    type Inputs = CompressorAeroInputs;
    type Outputs = CompressorAeroOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &CompressorAeroInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut CompressorAeroInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<CompressorAeroOutputs> {
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

    fn stage() -> CompressorAero {
        let mut c = CompressorAero::new("aero");
        c.inputs.fl_in = FluidState::new(101_325.0, 288.15, 20.0);
        c.inputs.sh_in = ShaftState::new(12_000.0, 1.5e6);
        c
    }

    #[test]
    fn work_raises_temperature_and_pressure() {
        let out = stage().run().unwrap();
        // ideal dry air: cp = 1004.685
        assert!((out.fl_out.tt - (288.15 + 75_000.0 / 1004.685)).abs() < 1e-3);
        assert!(out.pr > 1.0);
        assert!((out.fl_out.pt - 101_325.0 * out.pr).abs() < 1e-6);
        assert_eq!(out.fl_out.w, 20.0);
        assert_eq!(out.n, 12_000.0);
    }

    #[test]
    fn map_residual_is_consistent() {
        let out = stage().run().unwrap();
        assert!((out.psi_map - (1.0 - out.phi / 0.4)).abs() < 1e-12);
        assert!((out.eps_psi - (out.psi - out.psi_map)).abs() < 1e-12);
    }

    #[test]
    fn zero_flow_is_rejected() {
        let mut c = stage();
        c.inputs.fl_in.w = 0.0;
        assert!(c.run().is_err());
        c.inputs.fl_in.w = 20.0;
        c.inputs.sh_in.n = 0.0;
        assert!(c.run().is_err());
    }
}
