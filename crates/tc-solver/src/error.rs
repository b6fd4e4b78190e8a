//! Error types for solver operations.

use tc_system::SystemError;
use thiserror::Error;

/// Errors that can occur while building or solving a problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Unknown/equation mismatch, unresolvable path, or an unknown that is
    /// not a free input.
    #[error("Structural error: {what}")]
    Structural { what: String },

    #[error("Singular Jacobian at iteration {iteration}")]
    Singular { iteration: usize },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("System error: {0}")]
    System(#[from] SystemError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    /// The system could not be evaluated at a trial point, but may be at a
    /// shorter step.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SolverError::System(e) => e.is_recoverable(),
            _ => false,
        }
    }
}
