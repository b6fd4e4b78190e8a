//! Exhaust nozzle: exit geometry feeding the nozzle aero model.

mod aero;
mod geom;

pub use aero::{FlowRegime, NozzleAero, NozzleAeroInputs, NozzleAeroOutputs};
pub use geom::{NozzleGeom, NozzleGeomInputs, NozzleGeomOutputs};

use tc_core::Real;
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Assembly, DesignMethod, SystemResult};

/// Size the exit tip radius for the current mass flow.
pub const SCALING: &str = "scaling";

#[derive(Clone, Debug)]
pub struct Nozzle {
    assembly: Assembly,
}

tc_system::assembly_system!(Nozzle, assembly);

impl Nozzle {
    pub fn new(name: impl Into<String>) -> SystemResult<Self> {
        Self::with_gas(name, IdealDryAir::default())
    }

    pub fn with_gas<G: GasLaw + 'static>(name: impl Into<String>, gas: G) -> SystemResult<Self> {
        let mut assembly = Assembly::new(name);
        assembly.add_child(NozzleGeom::new("geom"))?;
        assembly.add_child(NozzleAero::with_gas("aero", gas))?;

        assembly.connect("geom.area", "aero.area")?;
        assembly.pull("fl_in", "aero.fl_in")?;
        assembly.pull("pamb", "aero.pamb")?;
        assembly.pull("thrust", "aero.thrust")?;
        assembly.pull("kp", "geom.kp")?;

        assembly.add_design_method(
            DesignMethod::new(SCALING)
                .bounded_unknown("kp.exit_tip.r", 0.0, Real::INFINITY)
                .target("fl_in.w"),
        );
        Ok(Self { assembly })
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }
}
