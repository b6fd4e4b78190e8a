//! A case file: parameters plus how to solve them.

use crate::error::ConfigResult;
use crate::params::{ParameterSet, RawTable};
use crate::{Format, parse};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Newton settings that may be overridden from a case file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub max_iterations: usize,
    pub abs_tol: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-8,
        }
    }
}

#[derive(Deserialize)]
struct RawCase {
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    solver: SolverSettings,
    #[serde(default)]
    parameters: RawTable,
}

/// ```yaml
/// method: scaling
/// solver: { max_iterations: 50 }
/// parameters:
///   fuel_w: 0.8
///   compressor: { sh_in: { n: 28000 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Case {
    pub method: Option<String>,
    pub solver: SolverSettings,
    pub parameters: ParameterSet,
}

impl Case {
    fn from_raw(raw: RawCase) -> ConfigResult<Self> {
        Ok(Self {
            method: raw.method,
            solver: raw.solver,
            parameters: ParameterSet::from_raw(raw.parameters)?,
        })
    }

    pub fn parse_str(content: &str, format: Format) -> ConfigResult<Self> {
        Self::from_raw(parse(content, format)?)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let format = Format::from_path(path)?;
        Self::parse_str(&std::fs::read_to_string(path)?, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let case = Case::parse_str("parameters:\n  fuel_w: 0.8\n", Format::Yaml).unwrap();
        assert_eq!(case.method, None);
        assert_eq!(case.solver, SolverSettings::default());
        assert_eq!(case.parameters.get("fuel_w"), Some(0.8));
    }

    #[test]
    fn solver_settings_are_partial() {
        let case = Case::parse_str(
            r#"{"method": "scaling", "solver": {"max_iterations": 20}}"#,
            Format::Json,
        )
        .unwrap();
        assert_eq!(case.method.as_deref(), Some("scaling"));
        assert_eq!(case.solver.max_iterations, 20);
        assert_eq!(case.solver.abs_tol, 1e-8);
        assert!(case.parameters.is_empty());
    }
}
