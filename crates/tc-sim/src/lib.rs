//! Transient drivers for gas-turbine systems.
//!
//! Provides:
//! - the [`TransientModel`] and [`State`] traits and fixed-step [`RK4`] / [`ForwardEuler`] integrators
//! - [`run_sim`] with decimated recording
//! - [`ScenarioModel`], which re-solves a system at every evaluation while
//!   boundary values follow functions of time

pub mod error;
pub mod integrator;
pub mod model;
pub mod scenario;
pub mod sim;

pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::{State, TransientModel};
pub use scenario::{ScenarioModel, ScenarioRecord, run_scenario};
pub use sim::{IntegratorType, SimOptions, SimRecord, run_sim};
