//! Turboprop: torque generator driving a propeller through a gearbox.

mod geom;

pub use geom::{TurbopropGeom, TurbopropGeomInputs, TurbopropGeomOutputs};
pub(crate) use geom::cowl_slope;

use crate::torque_generator::TorqueGenerator;
use tc_components::common::{FLUID_FIELDS, KEYPOINT_FIELDS, SHAFT_FIELDS};
use tc_components::config::apply_preset;
use tc_components::{Atmosphere, Gearbox, Inlet, Nozzle, Propeller};
use tc_config::ParameterSet;
use tc_core::Real;
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Assembly, DesignMethod, INTRINSIC, Snapshot, SystemResult};

pub const SCALING: &str = "scaling";

const PRESET: &str = include_str!("../../config/turboprop.json");

/// Turboprop engine.
///
/// Children, in compute order: `geom`, `atm`, `inlet`, `core` (a
/// [`TorqueGenerator`]), `gearbox`, `propeller`, `nozzle`. The propeller
/// and primary nozzle keypoints come from `geom`; the propeller sees the
/// free stream. The captured flow `atm.w` and the gas generator speed are
/// free and close the primary nozzle and the propeller load.
///
/// `thrust` is propeller plus nozzle thrust minus ram drag.
///
/// `scaling` holds the propeller flow, the gas generator speed and the
/// power turbine work, sizing the propeller and power turbine maps and the
/// primary nozzle area.
#[derive(Clone, Debug)]
pub struct Turboprop {
    assembly: Assembly,
}

tc_system::assembly_system!(Turboprop, assembly);

impl Turboprop {
    pub fn new(name: impl Into<String>) -> SystemResult<Self> {
        Self::with_gas(name, IdealDryAir::default())
    }

    pub fn with_gas<G: GasLaw + 'static>(name: impl Into<String>, gas: G) -> SystemResult<Self> {
        let mut assembly = Assembly::new(name);
        assembly.add_child(TurbopropGeom::new("geom"))?;
        assembly.add_child(Atmosphere::with_gas("atm", gas.clone()))?;
        assembly.add_child(Inlet::new("inlet"))?;
        assembly.add_child(TorqueGenerator::with_gas("core", gas.clone())?)?;
        assembly.add_child(Gearbox::new("gearbox"))?;
        assembly.add_child(Propeller::with_gas("propeller", gas.clone())?)?;
        assembly.add_child(Nozzle::with_gas("nozzle", gas)?)?;

        assembly.connect_port("atm.fl_out", "inlet.fl_in", &FLUID_FIELDS)?;
        assembly.connect("atm.speed", "inlet.flight_speed")?;
        assembly.connect_port("inlet.fl_out", "core.fl_in", &FLUID_FIELDS)?;
        assembly.connect_port("core.sh_out", "gearbox.sh_in", &SHAFT_FIELDS)?;
        assembly.connect_port("gearbox.sh_out", "propeller.sh_in", &SHAFT_FIELDS)?;
        assembly.connect_port("atm.fl_out", "propeller.fl_in", &["pt", "tt"])?;
        assembly.connect_port("core.fl_out", "nozzle.fl_in", &FLUID_FIELDS)?;
        assembly.connect("atm.pamb", "nozzle.pamb")?;
        assembly.connect_port("geom.propeller_kp", "propeller.kp", &KEYPOINT_FIELDS)?;
        assembly.connect_port("geom.primary_nozzle_kp", "nozzle.kp", &KEYPOINT_FIELDS)?;

        assembly.pull("altitude", "atm.altitude")?;
        assembly.pull("mach", "atm.mach")?;
        assembly.pull("fuel_w", "core.fuel_w")?;

        assembly.extend_intrinsic(
            &DesignMethod::new(INTRINSIC)
                .bounded_unknown("atm.w", 0.0, Real::INFINITY)
                .bounded_unknown("core.gg.compressor.sh_in.n", 0.0, Real::INFINITY),
        );
        assembly.add_design_method(
            DesignMethod::new(SCALING)
                .unknown("propeller.aero.phi_p")
                .unknown("core.power_turbine.aero.phi_p")
                .bounded_unknown("geom.pri_nozzle_area_ratio", 0.0, Real::INFINITY)
                .target("propeller.fl_in.w")
                .target("core.gg.compressor.sh_in.n")
                .target("core.power_turbine.aero.dh"),
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
    let propeller = snap.value("turboprop", "propeller.aero.thrust")?;
    let nozzle = snap.value("turboprop", "nozzle.aero.thrust")?;
    let ram_drag = snap.value("turboprop", "inlet.ram_drag")?;
    Ok(vec![("thrust".to_string(), propeller + nozzle - ram_drag)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_system::System;

    #[test]
    fn intrinsic_is_square() {
        let tp = Turboprop::new("tp").unwrap();
        let m = tp.intrinsic();
        let vars: Vec<_> = m.unknowns.iter().map(|u| u.var.as_str()).collect();
        assert_eq!(
            vars,
            [
                "core.gg.compressor.aero.sh_in.power",
                "core.gg.turbine.aero.dh",
                "core.power_turbine.aero.dh",
                "propeller.aero.fl_in.w",
                "atm.w",
                "core.gg.compressor.aero.sh_in.n",
            ]
        );
        assert_eq!(m.n_equations(), 6);
    }

    #[test]
    fn geometry_reaches_the_children() {
        let tp = Turboprop::new("tp").unwrap();
        let snap = tp.compute().unwrap();
        assert_eq!(snap.get("propeller.geom.kp.inlet_tip.r"), Some(2.5));
        assert_eq!(
            snap.get("nozzle.geom.kp.exit_tip.r"),
            snap.get("geom.primary_nozzle_kp.exit_tip.r")
        );
        assert_eq!(snap.get("propeller.aero.sh_in.n"), Some(1200.0));
    }

    #[test]
    fn thrust_adds_up() {
        let tp = Turboprop::new("tp").unwrap();
        let snap = tp.compute().unwrap();
        let sum = snap.get("propeller.aero.thrust").unwrap() + snap.get("nozzle.aero.thrust").unwrap()
            - snap.get("inlet.ram_drag").unwrap();
        assert_eq!(snap.get("thrust"), Some(sum));
    }
}
