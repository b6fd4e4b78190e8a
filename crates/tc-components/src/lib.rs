//! tc-components: gas-turbine component models.
//!
//! Leaf models implement [`tc_system::Component`]: a typed inputs record, a
//! pure `run` returning a typed outputs record, and an intrinsic design
//! method when the model carries its own off-design closure. Compressor,
//! turbine, nozzle and propeller are assemblies of a geometry leaf feeding
//! an aero leaf.

pub mod atmosphere;
pub mod combustor;
pub mod common;
pub mod compressor;
pub mod config;
pub mod error;
pub mod gearbox;
pub mod inlet;
pub mod nozzle;
pub mod propeller;
pub mod splitter;
pub mod turbine;

pub use atmosphere::Atmosphere;
pub use combustor::Combustor;
pub use compressor::{Compressor, CompressorAero, CompressorGeom};
pub use config::{CompressorConfig, TurbineConfig, UnknownConfig};
pub use error::{ComponentError, ComponentResult};
pub use gearbox::Gearbox;
pub use inlet::Inlet;
pub use nozzle::{FlowRegime, Nozzle, NozzleAero, NozzleGeom};
pub use propeller::{Propeller, PropellerAero, PropellerGeom};
pub use splitter::Splitter;
pub use turbine::{Turbine, TurbineAero, TurbineGeom};
