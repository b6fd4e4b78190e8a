//! Error types for transient runs.

use tc_solver::SolverError;
use tc_system::SystemError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A scenario or transient names a path the system cannot use.
    #[error("Invalid scenario: {what}")]
    Scenario { what: String },

    #[error("Solve failed at t = {t}: {source}")]
    Solve {
        t: f64,
        #[source]
        source: SolverError,
    },

    #[error(transparent)]
    System(#[from] SystemError),
}

pub type SimResult<T> = Result<T, SimError>;
