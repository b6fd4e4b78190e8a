//! Low-pressure spool compression: fan, splitter and booster.

use tc_components::common::FLUID_FIELDS;
use tc_components::config::apply_preset;
use tc_components::{Compressor, CompressorConfig, Splitter, compressor};
use tc_config::ParameterSet;
use tc_core::Real;
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Assembly, DesignMethod, INTRINSIC, Snapshot, SystemResult};

/// Fan and booster sizing at the module design point.
pub const SCALING: &str = "scaling";

const PRESET: &str = include_str!("../config/fan_module.json");

/// Fan, core/bypass splitter and booster on the low-pressure shaft.
///
/// The splitter divides the fan exit flow; the core stream goes through
/// the booster, which turns at the fan speed. The booster power is free so
/// that the booster sits on its map line whatever flow the fan and the
/// bypass ratio give it. `power` is the shaft power the whole module
/// draws.
///
/// Boundary: `fl_in` and `sh_in` (the fan's), `kp` (fan keypoints), `bpr`,
/// `fl_core` (booster exit) and `fl_bypass`.
///
/// `scaling` combines the fan and booster variants, frees the bypass ratio
/// and holds the booster pressure ratio.
#[derive(Clone, Debug)]
pub struct FanModule {
    assembly: Assembly,
}

tc_system::assembly_system!(FanModule, assembly);

impl FanModule {
    pub fn new(name: impl Into<String>) -> SystemResult<Self> {
        Self::with_gas(name, IdealDryAir::default())
    }

    pub fn with_gas<G: GasLaw + 'static>(name: impl Into<String>, gas: G) -> SystemResult<Self> {
        let mut assembly = Assembly::new(name);
        assembly.add_child(Compressor::with_gas("fan", CompressorConfig::Fan, gas.clone())?)?;
        assembly.add_child(Splitter::new("splitter"))?;
        assembly.add_child(Compressor::with_gas("booster", CompressorConfig::Booster, gas)?)?;

        assembly.connect_port("fan.fl_out", "splitter.fl_in", &FLUID_FIELDS)?;
        assembly.connect_port("splitter.fl_core", "booster.fl_in", &FLUID_FIELDS)?;
        assembly.connect("fan.n", "booster.sh_in.n")?;

        assembly.pull("fl_in", "fan.fl_in")?;
        assembly.pull("sh_in", "fan.sh_in")?;
        assembly.pull("kp", "fan.kp")?;
        assembly.pull("bpr", "splitter.bpr")?;
        assembly.pull("fl_core", "booster.fl_out")?;
        assembly.pull("fl_bypass", "splitter.fl_bypass")?;

        assembly.extend_intrinsic(&DesignMethod::new(INTRINSIC).unknown("booster.sh_in.power"));

        let scaling = assembly
            .child_method("fan", compressor::SCALING)?
            .extend(&assembly.child_method("booster", compressor::SCALING)?)
            .bounded_unknown("bpr", 0.0, Real::INFINITY)
            .target("booster.pr");
        assembly.add_design_method(DesignMethod {
            name: SCALING.to_string(),
            ..scaling
        });
        assembly.set_outwards(shaft_power);

        apply_preset(&mut assembly, ParameterSet::from_json_str(PRESET))?;
        Ok(Self { assembly })
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }
}

fn shaft_power(snap: &Snapshot) -> SystemResult<Vec<(String, Real)>> {
    let fan = snap.value("fan_module", "fan.aero.sh_in.power")?;
    let booster = snap.value("fan_module", "booster.aero.sh_in.power")?;
    Ok(vec![("power".to_string(), fan + booster)])
}
