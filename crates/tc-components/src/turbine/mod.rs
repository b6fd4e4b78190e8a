//! Axial turbine: blade-row geometry feeding the expansion aero model.

mod aero;
mod geom;

pub use aero::{TurbineAero, TurbineAeroInputs, TurbineAeroOutputs};
pub use geom::{TurbineGeom, TurbineGeomInputs, TurbineGeomOutputs};

use crate::config::{TurbineConfig, apply_preset};
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Assembly, DesignMethod, Equation, SystemResult};

/// Off-design with the shaft speed and power held at their current values.
pub const OFF_DESIGN_STANDALONE: &str = "off_design_standalone";

/// Design-point sizing: blade height and design corrected speed.
pub const SCALING: &str = "scaling";

/// Turbine assembly.
///
/// Children `geom` then `aero`, mean radius and inlet area connected.
/// `fl_in`, `fl_out`, `sh_out` and `kp` are pulled to the boundary.
#[derive(Clone, Debug)]
pub struct Turbine {
    assembly: Assembly,
    config: TurbineConfig,
}

tc_system::assembly_system!(Turbine, assembly);

impl Turbine {
    pub fn new(name: impl Into<String>, config: TurbineConfig) -> SystemResult<Self> {
        Self::with_gas(name, config, IdealDryAir::default())
    }

    pub fn with_gas<G: GasLaw + 'static>(
        name: impl Into<String>,
        config: TurbineConfig,
        gas: G,
    ) -> SystemResult<Self> {
        let mut assembly = Assembly::new(name);
        assembly.add_child(TurbineGeom::new("geom"))?;
        assembly.add_child(TurbineAero::with_gas("aero", gas))?;

        assembly.connect("geom.mean_radius", "aero.mean_radius")?;
        assembly.connect("geom.area_in", "aero.area_in")?;
        assembly.pull("fl_in", "aero.fl_in")?;
        assembly.pull("fl_out", "aero.fl_out")?;
        assembly.pull("sh_out", "aero.sh_out")?;
        assembly.pull("kp", "geom.kp")?;

        assembly.add_design_method(
            DesignMethod::new(OFF_DESIGN_STANDALONE)
                .unknown("aero.n")
                .unknown("aero.dh")
                .target("sh_out.n")
                .target("sh_out.power"),
        );
        assembly.add_design_method(
            DesignMethod::new(SCALING)
                .bounded_unknown("geom.blade_height_ratio", 0.0, 1.0)
                .unknown("aero.ncdes")
                .target("aero.psi")
                .equation(Equation::fixed("aero.ncqdes", 100.0)),
        );
        apply_preset(&mut assembly, config.parameters())?;

        Ok(Self { assembly, config })
    }

    pub fn config(&self) -> TurbineConfig {
        self.config
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }
}
