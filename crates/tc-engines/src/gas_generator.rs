//! Gas generator: high-pressure spool with its combustor.

use tc_components::common::FLUID_FIELDS;
use tc_components::config::apply_preset;
use tc_components::{Combustor, Compressor, CompressorConfig, Turbine, TurbineConfig, compressor, turbine};
use tc_config::ParameterSet;
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Assembly, DesignMethod, Equation, INTRINSIC, SystemResult};

/// Design-point sizing of both turbomachines.
pub const SCALING: &str = "scaling";

const PRESET: &str = include_str!("../config/gas_generator.json");

/// Compressor, combustor and turbine on one shaft.
///
/// The turbine runs at the compressor speed and the shaft is closed by
/// `compressor.sh_in.power == turbine.sh_out.power`, with the compressor
/// power and the turbine enthalpy drop free. Together with the compressor
/// inlet flow this balances the two map residuals.
///
/// Boundary: `fl_in`, `fl_out`, `fuel_w`.
#[derive(Clone, Debug)]
pub struct GasGenerator {
    assembly: Assembly,
}

tc_system::assembly_system!(GasGenerator, assembly);

impl GasGenerator {
    pub fn new(name: impl Into<String>) -> SystemResult<Self> {
        Self::with_gas(name, IdealDryAir::default())
    }

    pub fn with_gas<G: GasLaw + 'static>(name: impl Into<String>, gas: G) -> SystemResult<Self> {
        let mut assembly = Assembly::new(name);
        assembly.add_child(Compressor::with_gas("compressor", CompressorConfig::Hpc, gas.clone())?)?;
        assembly.add_child(Combustor::with_gas("combustor", gas.clone()))?;
        assembly.add_child(Turbine::with_gas("turbine", TurbineConfig::Hpt, gas)?)?;

        assembly.connect_port("compressor.fl_out", "combustor.fl_in", &FLUID_FIELDS)?;
        assembly.connect_port("combustor.fl_out", "turbine.fl_in", &FLUID_FIELDS)?;
        assembly.connect("compressor.sh_in.n", "turbine.aero.n")?;

        assembly.pull("fl_in", "compressor.fl_in")?;
        assembly.pull("fl_out", "turbine.fl_out")?;
        assembly.pull("fuel_w", "combustor.fuel_w")?;

        assembly.extend_intrinsic(
            &DesignMethod::new(INTRINSIC)
                .unknown("compressor.sh_in.power")
                .unknown("turbine.aero.dh")
                .equation(Equation::balance("compressor.sh_in.power", "turbine.sh_out.power")),
        );

        let scaling = assembly
            .child_method("compressor", compressor::SCALING)?
            .extend(&assembly.child_method("turbine", turbine::SCALING)?)
            .unknown("turbine.aero.phi_p");
        assembly.add_design_method(DesignMethod {
            name: SCALING.to_string(),
            ..scaling
        });

        apply_preset(&mut assembly, ParameterSet::from_json_str(PRESET))?;
        Ok(Self { assembly })
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_system::System;

    #[test]
    fn shaft_is_closed_by_the_intrinsic() {
        let gg = GasGenerator::new("gg").unwrap();
        let m = gg.intrinsic();
        let unknowns: Vec<_> = m.unknowns.iter().map(|u| u.var.as_str()).collect();
        assert_eq!(
            unknowns,
            [
                "compressor.aero.fl_in.w",
                "compressor.aero.sh_in.power",
                "turbine.aero.dh"
            ]
        );
        assert_eq!(m.n_equations(), 3);
    }

    #[test]
    fn turbine_follows_the_compressor() {
        let mut gg = GasGenerator::new("gg").unwrap();
        let snap = gg.compute().unwrap();
        assert_eq!(snap.get("turbine.aero.n"), Some(28762.5));
        assert_eq!(snap.get("turbine.aero.fl_in.tt"), snap.get("combustor.tcomb"));
        assert!(gg.set("turbine.fl_in.w", 1.0).is_err());
    }

    #[test]
    fn boundary_aliases() {
        let gg = GasGenerator::new("gg").unwrap();
        assert_eq!(gg.resolve("fl_in.w"), "compressor.aero.fl_in.w");
        assert_eq!(gg.resolve("fuel_w"), "combustor.fuel_w");
        assert_eq!(gg.get("fuel_w").unwrap(), 0.739);
    }

    #[test]
    fn scaling_composes_both_spools() {
        let gg = GasGenerator::new("gg").unwrap();
        let m = gg.design_method(SCALING).unwrap();
        assert_eq!(m.name, SCALING);
        assert_eq!(m.unknowns.len(), 5);
        assert_eq!(m.n_equations(), 4);
        assert!(m.unknowns.iter().any(|u| u.var == "turbine.aero.phi_p"));
    }
}
