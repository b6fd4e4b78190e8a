//! Systems the CLI can build by name.

use crate::error::{CliError, CliResult};
use tc_components::{Combustor, Compressor, CompressorConfig, Nozzle, Propeller, Turbine, TurbineConfig};
use tc_engines::{EngineKind, FanModule};
use tc_system::System;

/// Standalone components, optionally followed by `:<preset>`.
pub const COMPONENTS: [&str; 6] = ["compressor", "turbine", "combustor", "nozzle", "propeller", "fan_module"];

/// Build `name`: an engine label, or a component with an optional preset
/// such as `compressor:hpc`.
pub fn build(name: &str) -> CliResult<Box<dyn System>> {
    if let Ok(kind) = name.parse::<EngineKind>() {
        return Ok(kind.build(kind.label())?);
    }
    let (kind, preset) = match name.split_once(':') {
        Some((kind, preset)) => (kind, Some(preset)),
        None => (name, None),
    };
    let system: Box<dyn System> = match (kind, preset) {
        ("compressor", preset) => {
            let config = preset.map(str::parse::<CompressorConfig>).transpose()?.unwrap_or_default();
            Box::new(Compressor::new(kind, config)?)
        }
        ("turbine", preset) => {
            let config = preset.map(str::parse::<TurbineConfig>).transpose()?.unwrap_or_default();
            Box::new(Turbine::new(kind, config)?)
        }
        ("combustor", None) => Box::new(Combustor::new(kind)),
        ("nozzle", None) => Box::new(Nozzle::new(kind)?),
        ("propeller", None) => Box::new(Propeller::new(kind)?),
        ("fan_module", None) => Box::new(FanModule::new(kind)?),
        _ => return Err(CliError::UnknownSystem(name.to_string())),
    };
    Ok(system)
}

/// Every buildable name, presets expanded.
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = EngineKind::ALL.iter().map(|e| e.label().to_string()).collect();
    for component in COMPONENTS {
        match component {
            "compressor" => names.extend(CompressorConfig::ALL.iter().map(|c| format!("compressor:{}", c.label()))),
            "turbine" => names.extend(TurbineConfig::ALL.iter().map(|c| format!("turbine:{}", c.label()))),
            other => names.push(other.to_string()),
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_builds() {
        for name in names() {
            assert!(build(&name).is_ok(), "{name}");
        }
        assert!(build("compressor").is_ok());
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(build("turbojet"), Err(CliError::UnknownSystem(_))));
        assert!(matches!(build("compressor:ipc"), Err(CliError::Preset(_))));
        assert!(matches!(build("nozzle:big"), Err(CliError::UnknownSystem(_))));
    }
}
