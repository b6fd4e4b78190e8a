//! Axial compressor: annulus geometry feeding the stage-stack aero model.

mod aero;
mod geom;

pub use aero::{CompressorAero, CompressorAeroInputs, CompressorAeroOutputs};
pub use geom::{CompressorGeom, CompressorGeomInputs, CompressorGeomOutputs};

use crate::config::{CompressorConfig, apply_preset};
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Assembly, DesignMethod, SystemResult};

/// Name of the design-point sizing method.
pub const SCALING: &str = "scaling";

/// Upper bound of the hub-to-tip ratio when it is a booster unknown.
pub const MAX_HUB_TO_TIP: f64 = 1.0 - 1e-3;

/// Compressor assembly.
///
/// Children `geom` then `aero`; the inlet tip radius, exit tip radius and
/// inlet area flow from geometry to aero. `fl_in`, `fl_out`, `sh_in` and
/// `kp` are pulled to the boundary, as are `pr`, `phi` and the shaft speed
/// echo `n`.
///
/// The preset is applied on construction and fixes the `scaling` variant:
///
/// | config | unknowns | targets |
/// |---|---|---|
/// | default, fan | `aero.phi_p` | `fl_in.w` |
/// | booster | `aero.phi_p`, `geom.blade_hub_to_tip_ratio` | `fl_in.w`, `aero.phi` |
/// | hpc | `aero.phi_p`, `aero.sh_in.power` | `fl_in.w`, `aero.pr` |
#[derive(Clone, Debug)]
pub struct Compressor {
    assembly: Assembly,
    config: CompressorConfig,
}

tc_system::assembly_system!(Compressor, assembly);

impl Compressor {
    pub fn new(name: impl Into<String>, config: CompressorConfig) -> SystemResult<Self> {
        Self::with_gas(name, config, IdealDryAir::default())
    }

    pub fn with_gas<G: GasLaw + 'static>(
        name: impl Into<String>,
        config: CompressorConfig,
        gas: G,
    ) -> SystemResult<Self> {
        let mut assembly = Assembly::new(name);
        assembly.add_child(CompressorGeom::new("geom"))?;
        assembly.add_child(CompressorAero::with_gas("aero", gas))?;

        for field in ["tip_in_r", "tip_out_r", "inlet_area"] {
            assembly.connect(&format!("geom.{field}"), &format!("aero.{field}"))?;
        }
        assembly.pull("fl_in", "aero.fl_in")?;
        assembly.pull("fl_out", "aero.fl_out")?;
        assembly.pull("sh_in", "aero.sh_in")?;
        assembly.pull("kp", "geom.kp")?;
        assembly.pull("pr", "aero.pr")?;
        assembly.pull("phi", "aero.phi")?;
        assembly.pull("n", "aero.n")?;

        assembly.add_design_method(scaling_method(config));
        apply_preset(&mut assembly, config.parameters())?;

        Ok(Self { assembly, config })
    }

    pub fn config(&self) -> CompressorConfig {
        self.config
    }

    pub fn assembly(&self) -> &Assembly {
        &self.assembly
    }
}

fn scaling_method(config: CompressorConfig) -> DesignMethod {
    let base = DesignMethod::new(SCALING).unknown("aero.phi_p").target("fl_in.w");
    match config {
        CompressorConfig::Default | CompressorConfig::Fan => base,
        CompressorConfig::Booster => base
            .bounded_unknown("geom.blade_hub_to_tip_ratio", 0.0, MAX_HUB_TO_TIP)
            .target("aero.phi"),
        CompressorConfig::Hpc => base.unknown("aero.sh_in.power").target("aero.pr"),
    }
}
