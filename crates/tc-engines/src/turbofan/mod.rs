//! Two-spool separate-flow turbofan.

mod geom;
mod weight;

pub use geom::{TurbofanGeom, TurbofanGeomInputs, TurbofanGeomOutputs};
pub use weight::{TurbofanWeight, TurbofanWeightInputs, TurbofanWeightOutputs};

use crate::fan_module::FanModule;
use crate::gas_generator::GasGenerator;
use tc_components::common::{FLUID_FIELDS, KEYPOINT_FIELDS};
use tc_components::config::apply_preset;
use tc_components::{Atmosphere, Inlet, Nozzle, Turbine, TurbineConfig};
use tc_config::ParameterSet;
use tc_core::Real;
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Assembly, DesignMethod, Equation, INTRINSIC, Snapshot, SystemResult};

pub const SCALING: &str = "scaling";

const PRESET: &str = include_str!("../../config/turbofan.json");

/// Turbofan engine.
///
/// Children, in compute order: `geom`, `weight`, `atm`, `inlet`,
/// `fan_module` (a [`FanModule`]), `core` (a [`GasGenerator`]), `lpt`,
/// `primary` and `secondary` nozzles. The LPT drives the fan module; the
/// low spool is closed by `fan_module.power == lpt.sh_out.power`, where
/// `power` counts the fan and the booster.
///
/// Free at the engine level: captured flow, fan power, bypass ratio, both
/// spool speeds and the LPT enthalpy drop. The fan and nozzle keypoints
/// come from `geom`, the mass estimate `weight.total` from its envelope.
///
/// `thrust` is the sum of both nozzle thrusts minus ram drag; `bpr` is the
/// fan module bypass ratio.
#[derive(Clone, Debug)]
pub struct Turbofan {
    assembly: Assembly,
}

tc_system::assembly_system!(Turbofan, assembly);

impl Turbofan {
    pub fn new(name: impl Into<String>) -> SystemResult<Self> {
        Self::with_gas(name, IdealDryAir::default())
    }

    pub fn with_gas<G: GasLaw + 'static>(name: impl Into<String>, gas: G) -> SystemResult<Self> {
        let mut assembly = Assembly::new(name);
        assembly.add_child(TurbofanGeom::new("geom"))?;
        assembly.add_child(TurbofanWeight::new("weight"))?;
        assembly.add_child(Atmosphere::with_gas("atm", gas.clone()))?;
        assembly.add_child(Inlet::new("inlet"))?;
        assembly.add_child(FanModule::with_gas("fan_module", gas.clone())?)?;
        assembly.add_child(GasGenerator::with_gas("core", gas.clone())?)?;
        assembly.add_child(Turbine::with_gas("lpt", TurbineConfig::Lpt, gas.clone())?)?;
        assembly.add_child(Nozzle::with_gas("primary", gas.clone())?)?;
        assembly.add_child(Nozzle::with_gas("secondary", gas)?)?;

        for field in ["fan_diameter", "fan_module_length", "engine_length"] {
            assembly.connect(&format!("geom.{field}"), &format!("weight.{field}"))?;
        }
        assembly.connect_port("atm.fl_out", "inlet.fl_in", &FLUID_FIELDS)?;
        assembly.connect("atm.speed", "inlet.flight_speed")?;
        assembly.connect_port("inlet.fl_out", "fan_module.fl_in", &FLUID_FIELDS)?;
        assembly.connect_port("fan_module.fl_core", "core.fl_in", &FLUID_FIELDS)?;
        assembly.connect_port("core.fl_out", "lpt.fl_in", &FLUID_FIELDS)?;
        assembly.connect("fan_module.sh_in.n", "lpt.aero.n")?;
        assembly.connect_port("lpt.fl_out", "primary.fl_in", &FLUID_FIELDS)?;
        assembly.connect_port("fan_module.fl_bypass", "secondary.fl_in", &FLUID_FIELDS)?;
        assembly.connect("atm.pamb", "primary.pamb")?;
        assembly.connect("atm.pamb", "secondary.pamb")?;
        assembly.connect_port("geom.fan_kp", "fan_module.kp", &KEYPOINT_FIELDS)?;
        assembly.connect_port("geom.primary_nozzle_kp", "primary.kp", &KEYPOINT_FIELDS)?;
        assembly.connect_port("geom.secondary_nozzle_kp", "secondary.kp", &KEYPOINT_FIELDS)?;

        assembly.pull("altitude", "atm.altitude")?;
        assembly.pull("mach", "atm.mach")?;
        assembly.pull("fl_in", "atm.fl_out")?;
        assembly.pull("fuel_w", "core.fuel_w")?;
        assembly.pull("bpr", "fan_module.bpr")?;

        assembly.extend_intrinsic(
            &DesignMethod::new(INTRINSIC)
                .bounded_unknown("atm.w", 0.0, Real::INFINITY)
                .unknown("fan_module.sh_in.power")
                .bounded_unknown("bpr", 0.0, Real::INFINITY)
                .bounded_unknown("fan_module.sh_in.n", 0.0, Real::INFINITY)
                .unknown("core.compressor.sh_in.n")
                .unknown("lpt.aero.dh")
                .equation(Equation::balance("fan_module.power", "lpt.sh_out.power")),
        );
        assembly.add_design_method(
            DesignMethod::new(SCALING)
                .bounded_unknown("geom.pri_nozzle_area_ratio", 0.0, Real::INFINITY)
                .bounded_unknown("geom.sec_nozzle_area_ratio", 0.0, Real::INFINITY)
                .unknown("lpt.aero.phi_p")
                .target("fl_in.w")
                .target("bpr")
                .target("fan_module.sh_in.n"),
        );
        assembly.set_outwards(net_thrust);

        apply_preset(&mut assembly, ParameterSet::from_json_str(PRESET))?;
        Ok(Self { assembly })
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }
}

fn net_thrust(snap: &Snapshot) -> SystemResult<Vec<(String, Real)>> {
    let primary = snap.value("turbofan", "primary.aero.thrust")?;
    let secondary = snap.value("turbofan", "secondary.aero.thrust")?;
    let ram_drag = snap.value("turbofan", "inlet.ram_drag")?;
    Ok(vec![("thrust".to_string(), primary + secondary - ram_drag)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_system::System;

    #[test]
    fn intrinsic_is_square() {
        let tf = Turbofan::new("tf").unwrap();
        let m = tf.intrinsic();
        assert_eq!(m.unknowns.len(), 9);
        assert_eq!(m.n_equations(), 9);
        for connected in [
            "fan_module.fan.aero.fl_in.w",
            "fan_module.booster.aero.fl_in.w",
            "core.compressor.aero.fl_in.w",
            "lpt.aero.fl_in.w",
        ] {
            assert!(!m.unknowns.iter().any(|u| u.var == connected), "{connected}");
        }
        assert!(m.unknowns.iter().any(|u| u.var == "fan_module.booster.aero.sh_in.power"));
    }

    #[test]
    fn low_spool_speed_is_shared() {
        let tf = Turbofan::new("tf").unwrap();
        let snap = tf.compute().unwrap();
        assert_eq!(snap.get("lpt.aero.n"), Some(5146.4));
        assert_eq!(snap.get("fan_module.booster.aero.sh_in.n"), Some(5146.4));
        assert_eq!(snap.get("fan_module.fan.geom.kp.inlet_tip.r"), Some(1.0));
        let core = snap.get("fan_module.booster.aero.fl_out.w").unwrap();
        assert_eq!(snap.get("core.compressor.aero.fl_in.w"), Some(core));
    }

    #[test]
    fn weight_follows_the_envelope() {
        let tf = Turbofan::new("tf").unwrap();
        let snap = tf.compute().unwrap();
        assert_eq!(snap.get("weight.fan_diameter"), snap.get("geom.fan_diameter"));
        assert_eq!(snap.get("weight.engine_length"), snap.get("geom.engine_length"));
        assert!(snap.get("weight.total").unwrap() > 0.0);
    }

    #[test]
    fn boundary_aliases() {
        let tf = Turbofan::new("tf").unwrap();
        assert_eq!(tf.resolve("fl_in.w"), "atm.fl_out.w");
        assert_eq!(tf.resolve("bpr"), "fan_module.splitter.bpr");
        assert_eq!(tf.get("bpr").unwrap(), 6.5);
        assert_eq!(tf.resolve("fuel_w"), "core.combustor.fuel_w");
    }
}
