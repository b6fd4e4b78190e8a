//! Error types for system composition and evaluation.

use thiserror::Error;

/// Errors raised while reading, writing or computing a system.
///
/// Every variant names the system it came from so a failed solve can point
/// at the offending component.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SystemError {
    #[error("{system}: domain error: {what}")]
    Domain { system: String, what: String },

    #[error("{system}: convergence failed: {what}")]
    Convergence { system: String, what: String },

    #[error("{system}: unknown variable `{path}`")]
    UnknownVariable { system: String, path: String },

    #[error("{system}: `{path}` is not a free input")]
    ReadOnly { system: String, path: String },

    #[error("{system}: invalid connection: {what}")]
    Connection { system: String, what: String },

    #[error("{system}: no design method named `{name}`")]
    UnknownDesignMethod { system: String, name: String },

    #[error("invalid equation `{text}`: {what}")]
    Equation { text: String, what: &'static str },
}

pub type SystemResult<T> = Result<T, SystemError>;

impl SystemError {
    /// Domain and convergence failures describe a bad operating point rather
    /// than a bad model, so an iterative driver may back off and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SystemError::Domain { .. } | SystemError::Convergence { .. }
        )
    }
}
