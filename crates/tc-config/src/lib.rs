//! tc-config: parameter files for systems.
//!
//! A parameter file is a nested JSON or YAML table whose leaves are numbers.
//! Nesting is flattened into dotted paths, so
//!
//! ```yaml
//! aero:
//!   phi_p: 0.2
//! kp:
//!   inlet_tip: { r: 1.0 }
//! ```
//!
//! sets `aero.phi_p` and `kp.inlet_tip.r`. A [`Case`] adds the design method
//! to solve and solver settings on top of the parameters.

pub mod case;
pub mod error;
pub mod params;

pub use case::{Case, SolverSettings};
pub use error::{ConfigError, ConfigResult};
pub use params::{ParameterSet, apply};

use std::path::Path;

/// Format of a file on disk, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

pub(crate) fn parse<T: serde::de::DeserializeOwned>(content: &str, format: Format) -> ConfigResult<T> {
    Ok(match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    })
}
