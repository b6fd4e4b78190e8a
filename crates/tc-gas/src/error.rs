//! Error types for gas property evaluation.

use tc_core::TcError;
use thiserror::Error;

/// Errors raised by gas-law relations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// Physically invalid input, e.g. a non-positive absolute temperature.
    #[error("Domain error: {what} = {value}")]
    Domain { what: &'static str, value: f64 },

    /// Temperature-from-enthalpy inversion did not meet its tolerance.
    #[error("Convergence failed: {what} after {iterations} iterations (last step {last_step:e} K)")]
    Convergence {
        what: &'static str,
        iterations: usize,
        last_step: f64,
    },
}

pub type GasResult<T> = Result<T, GasError>;

impl From<TcError> for GasError {
    fn from(e: TcError) -> Self {
        match e {
            TcError::NonFinite { what, value } | TcError::NonPositive { what, value } => {
                GasError::Domain { what, value }
            }
            TcError::InvalidArg { what } => GasError::Domain {
                what,
                value: f64::NAN,
            },
        }
    }
}
