//! Error types for component operations.

use tc_core::TcError;
use tc_gas::GasError;
use tc_system::SystemError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Domain error: {what} = {value}")]
    Domain { what: &'static str, value: f64 },

    #[error("Convergence failed: {what}")]
    Convergence { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<GasError> for ComponentError {
    fn from(e: GasError) -> Self {
        match e {
            GasError::Domain { what, value } => ComponentError::Domain { what, value },
            GasError::Convergence { .. } => ComponentError::Convergence {
                what: e.to_string(),
            },
        }
    }
}

impl From<TcError> for ComponentError {
    fn from(e: TcError) -> Self {
        match e {
            TcError::NonFinite { what, value } | TcError::NonPositive { what, value } => {
                ComponentError::Domain { what, value }
            }
            TcError::InvalidArg { what } => ComponentError::InvalidArg { what },
        }
    }
}

impl From<tc_config::ConfigError> for ComponentError {
    fn from(e: tc_config::ConfigError) -> Self {
        ComponentError::Config {
            message: e.to_string(),
        }
    }
}

impl ComponentError {
    /// Attribute the error to the system `name`.
    pub fn in_system(self, name: &str) -> SystemError {
        let system = name.to_string();
        match self {
            ComponentError::Domain { what, value } => SystemError::Domain {
                system,
                what: format!("{what} = {value}"),
            },
            ComponentError::Convergence { what } => SystemError::Convergence { system, what },
            ComponentError::InvalidArg { what } => SystemError::Domain {
                system,
                what: what.to_string(),
            },
            ComponentError::Config { message } => SystemError::Connection {
                system,
                what: message,
            },
        }
    }
}

impl From<ComponentError> for SystemError {
    fn from(e: ComponentError) -> Self {
        e.in_system("component")
    }
}
