//! tc-engines: whole-engine assemblies built from `tc-components`.
//!
//! - [`GasGenerator`]: compressor, combustor and turbine on one shaft
//! - [`TorqueGenerator`]: gas generator plus a free power turbine
//! - [`Turboprop`]: torque generator, gearbox, propeller and primary nozzle
//! - [`FanModule`]: fan, splitter and booster on the low-pressure shaft
//! - [`Turbofan`]: fan module, gas generator, LPT, two nozzles and a mass
//!   estimate
//!
//! Each engine applies its preset on construction and exposes a `scaling`
//! design method next to its intrinsic off-design closure.

pub mod fan_module;
pub mod gas_generator;
pub mod torque_generator;
pub mod turbofan;
pub mod turboprop;

pub use fan_module::FanModule;
pub use gas_generator::GasGenerator;
pub use torque_generator::TorqueGenerator;
pub use turbofan::{Turbofan, TurbofanGeom, TurbofanWeight};
pub use turboprop::{Turboprop, TurbopropGeom};

use std::fmt;
use std::str::FromStr;
use tc_system::{System, SystemResult};
use tracing::debug;

/// Every engine this crate builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineKind {
    GasGenerator,
    TorqueGenerator,
    Turboprop,
    Turbofan,
}

impl EngineKind {
    pub const ALL: [EngineKind; 4] = [
        Self::GasGenerator,
        Self::TorqueGenerator,
        Self::Turboprop,
        Self::Turbofan,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::GasGenerator => "gas_generator",
            Self::TorqueGenerator => "torque_generator",
            Self::Turboprop => "turboprop",
            Self::Turbofan => "turbofan",
        }
    }

    /// Name of the engine's design-point sizing method.
    pub fn scaling_method(self) -> &'static str {
        match self {
            Self::GasGenerator => gas_generator::SCALING,
            Self::TorqueGenerator => torque_generator::SCALING,
            Self::Turboprop => turboprop::SCALING,
            Self::Turbofan => turbofan::SCALING,
        }
    }

    /// Build the engine with its preset.
    pub fn build(self, name: &str) -> SystemResult<Box<dyn System>> {
        debug!(engine = %self, name, "building engine");
        Ok(match self {
            Self::GasGenerator => Box::new(GasGenerator::new(name)?),
            Self::TorqueGenerator => Box::new(TorqueGenerator::new(name)?),
            Self::Turboprop => Box::new(Turboprop::new(name)?),
            Self::Turbofan => Box::new(Turbofan::new(name)?),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine `{0}`")]
pub struct UnknownEngine(pub String);

impl FromStr for EngineKind {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.label() == s)
            .ok_or_else(|| UnknownEngine(s.to_string()))
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
