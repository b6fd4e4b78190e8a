//! Composition engine for zero-dimensional component models.
//!
//! - [`System`]: dotted-path get/set, pure `compute` returning a [`Snapshot`],
//!   and the design methods a system declares
//! - [`Component`]: typed leaf models (inputs record in, outputs record out);
//!   every `Component` is a `System`
//! - [`Assembly`]: ordered children wired by per-variable connections, with
//!   pulled aliases and assembly-level design methods
//! - [`DesignMethod`]: composable bag of unknowns, targets and equations

pub mod assembly;
pub mod error;
pub mod method;
pub mod snapshot;
pub mod system;

pub use assembly::{Assembly, Outwards};
pub use error::{SystemError, SystemResult};
pub use method::{DesignMethod, Equation, INTRINSIC, Target, Unknown};
pub use snapshot::Snapshot;
pub use system::{Component, System};
