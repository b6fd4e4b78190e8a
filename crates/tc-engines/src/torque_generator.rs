//! Torque generator: gas generator driving a free power turbine.

use crate::gas_generator::{self, GasGenerator};
use tc_components::common::FLUID_FIELDS;
use tc_components::config::apply_preset;
use tc_components::{Turbine, TurbineConfig};
use tc_config::ParameterSet;
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Assembly, DesignMethod, Equation, INTRINSIC, SystemResult};

pub const SCALING: &str = "scaling";

const PRESET: &str = include_str!("../config/torque_generator.json");

/// Gas generator `gg` exhausting into a free power turbine.
///
/// The power turbine speed is an input (it is set by the load); its
/// enthalpy drop is free and closes its map residual. The output shaft is
/// pulled as `sh_out`.
///
/// `scaling` sizes the gas generator and fits the power-turbine map
/// (`phi_p`, `ncdes`) to the current enthalpy drop at 100 % corrected speed.
#[derive(Clone, Debug)]
pub struct TorqueGenerator {
    assembly: Assembly,
}

tc_system::assembly_system!(TorqueGenerator, assembly);

impl TorqueGenerator {
    pub fn new(name: impl Into<String>) -> SystemResult<Self> {
        Self::with_gas(name, IdealDryAir::default())
    }

    pub fn with_gas<G: GasLaw + 'static>(name: impl Into<String>, gas: G) -> SystemResult<Self> {
        let mut assembly = Assembly::new(name);
        assembly.add_child(GasGenerator::with_gas("gg", gas.clone())?)?;
        assembly.add_child(Turbine::with_gas("power_turbine", TurbineConfig::Lpt, gas)?)?;

        assembly.connect_port("gg.fl_out", "power_turbine.fl_in", &FLUID_FIELDS)?;

        assembly.pull("fl_in", "gg.fl_in")?;
        assembly.pull("fuel_w", "gg.fuel_w")?;
        assembly.pull("fl_out", "power_turbine.fl_out")?;
        assembly.pull("sh_out", "power_turbine.sh_out")?;

        assembly.extend_intrinsic(&DesignMethod::new(INTRINSIC).unknown("power_turbine.aero.dh"));

        let scaling = assembly
            .child_method("gg", gas_generator::SCALING)?
            .extend(
                &DesignMethod::new(SCALING)
                    .unknown("power_turbine.aero.phi_p")
                    .unknown("power_turbine.aero.ncdes")
                    .target("power_turbine.aero.dh")
                    .equation(Equation::fixed("power_turbine.aero.ncqdes", 100.0)),
            );
        assembly.add_design_method(scaling);

        apply_preset(&mut assembly, ParameterSet::from_json_str(PRESET))?;
        Ok(Self { assembly })
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }
}
