//! Propeller: disk geometry feeding the propeller aero model.

mod aero;
mod geom;

pub use aero::{PropellerAero, PropellerAeroInputs, PropellerAeroOutputs};
pub use geom::{PropellerGeom, PropellerGeomInputs, PropellerGeomOutputs};

use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Assembly, DesignMethod, Equation, SystemResult};

/// Design speed and zero-load flow coefficient for the current point.
pub const SCALING: &str = "scaling";

#[derive(Clone, Debug)]
pub struct Propeller {
    assembly: Assembly,
}

tc_system::assembly_system!(Propeller, assembly);

impl Propeller {
    pub fn new(name: impl Into<String>) -> SystemResult<Self> {
        Self::with_gas(name, IdealDryAir::default())
    }

    pub fn with_gas<G: GasLaw + 'static>(name: impl Into<String>, gas: G) -> SystemResult<Self> {
        let mut assembly = Assembly::new(name);
        assembly.add_child(PropellerGeom::new("geom"))?;
        assembly.add_child(PropellerAero::with_gas("aero", gas))?;

        assembly.connect("geom.radius", "aero.radius")?;
        assembly.connect("geom.inlet_area", "aero.inlet_area")?;
        assembly.pull("fl_in", "aero.fl_in")?;
        assembly.pull("fl_out", "aero.fl_out")?;
        assembly.pull("sh_in", "aero.sh_in")?;
        assembly.pull("kp", "geom.kp")?;
        assembly.pull("thrust", "aero.thrust")?;

        assembly.add_design_method(
            DesignMethod::new(SCALING)
                .unknown("aero.xnd")
                .equation(Equation::fixed("aero.pcnr", 100.0))
                .unknown("aero.phi_p")
                .target("fl_in.w"),
        );
        Ok(Self { assembly })
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }
}
