//! Combustor: fuel addition with an enthalpy balance.

use crate::common::check_positive;
use crate::error::{ComponentError, ComponentResult};
use tc_core::{FluidState, Real, variables};
use tc_gas::{DEFAULT_T_TOL, GasLaw, IdealDryAir};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct CombustorInputs {
    pub fl_in: FluidState,
    /// Fuel mass flow (kg/s)
    pub fuel_w: Real,
    /// Fuel lower heating value (J/kg)
    pub fhv: Real,
    /// Combustion efficiency
    pub eff: Real,
    /// Relative total pressure loss
    pub dp_rel: Real,
}

impl Default for CombustorInputs {
    fn default() -> Self {
        Self {
            fl_in: FluidState::default(),
            fuel_w: 1.0,
            fhv: 47.0e6,
            eff: 0.99,
            dp_rel: 0.0,
        }
    }
}

variables!(CombustorInputs { fuel_w, fhv, eff, dp_rel } nested { fl_in });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombustorOutputs {
    pub fl_out: FluidState,
    /// Outlet total temperature (K)
    pub tcomb: Real,
    /// Fuel to air ratio
    pub far: Real,
}

variables!(CombustorOutputs { tcomb, far } nested { fl_out });

/// Adiabatic mixing of the air stream with the heat released by the fuel.
///
/// ```text
/// w_out = w_in + fuel_w
/// h_out = (w_in * h(tt_in) + fuel_w * fhv * eff) / w_out
/// ```
///
/// No unknowns of its own.
#[derive(Clone, Debug)]
pub struct Combustor<G: GasLaw = IdealDryAir> {
    name: String,
    gas: G,
    pub inputs: CombustorInputs,
}

impl Combustor<IdealDryAir> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_gas(name, IdealDryAir::default())
    }
}

impl<G: GasLaw> Combustor<G> {
    pub fn with_gas(name: impl Into<String>, gas: G) -> Self {
        Self {
            name: name.into(),
            gas,
            inputs: CombustorInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<CombustorOutputs> {
        let i = &self.inputs;
        let w_in = check_positive(i.fl_in.w, "mass flow")?;
        if i.fuel_w.is_nan() || i.fuel_w < 0.0 {
            return Err(ComponentError::Domain {
                what: "fuel flow",
                value: i.fuel_w,
            });
        }
        if !(0.0..1.0).contains(&i.dp_rel) {
            return Err(ComponentError::Domain {
                what: "relative pressure loss",
                value: i.dp_rel,
            });
        }

        let w_out = w_in + i.fuel_w;
        let h_out = (w_in * self.gas.enthalpy(i.fl_in.tt) + i.fuel_w * i.fhv * i.eff) / w_out;
        let tcomb = self.gas.temperature_from_enthalpy(h_out, DEFAULT_T_TOL)?;

        Ok(CombustorOutputs {
            fl_out: FluidState::new(i.fl_in.pt * (1.0 - i.dp_rel), tcomb, w_out),
            tcomb,
            far: i.fuel_w / w_in,
        })
    }
}

impl<G: GasLaw + 'static> Component for Combustor<G> {
    type Inputs = CombustorInputs;
    type Outputs = CombustorOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &CombustorInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut CombustorInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<CombustorOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}
