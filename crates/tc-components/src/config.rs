//! Named parameter presets for the configurable components.
//!
//! Each preset is a JSON document next to the component
//! (`config/<component>/<label>.json`), embedded at build time. The label
//! also selects the component's scaling variant, once, at construction.

use std::fmt;
use std::str::FromStr;
use tc_config::{ConfigError, ConfigResult, ParameterSet, apply};
use tc_system::{System, SystemError, SystemResult};
use tracing::debug;

/// Compressor preset and scaling variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompressorConfig {
    #[default]
    Default,
    Fan,
    Booster,
    Hpc,
}

impl CompressorConfig {
    pub const ALL: [CompressorConfig; 4] = [Self::Default, Self::Fan, Self::Booster, Self::Hpc];

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fan => "fan",
            Self::Booster => "booster",
            Self::Hpc => "hpc",
        }
    }

    fn document(self) -> &'static str {
        match self {
            Self::Default => include_str!("../config/compressor/default.json"),
            Self::Fan => include_str!("../config/compressor/fan.json"),
            Self::Booster => include_str!("../config/compressor/booster.json"),
            Self::Hpc => include_str!("../config/compressor/hpc.json"),
        }
    }

    pub fn parameters(self) -> ConfigResult<ParameterSet> {
        ParameterSet::from_json_str(self.document())
    }
}

/// Turbine preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TurbineConfig {
    #[default]
    Default,
    Hpt,
    Lpt,
}

impl TurbineConfig {
    pub const ALL: [TurbineConfig; 3] = [Self::Default, Self::Hpt, Self::Lpt];

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hpt => "hpt",
            Self::Lpt => "lpt",
        }
    }

    fn document(self) -> &'static str {
        match self {
            Self::Default => include_str!("../config/turbine/default.json"),
            Self::Hpt => include_str!("../config/turbine/hpt.json"),
            Self::Lpt => include_str!("../config/turbine/lpt.json"),
        }
    }

    pub fn parameters(self) -> ConfigResult<ParameterSet> {
        ParameterSet::from_json_str(self.document())
    }
}

/// Error for a label that names no preset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} configuration `{label}`")]
pub struct UnknownConfig {
    pub kind: &'static str,
    pub label: String,
}

impl FromStr for CompressorConfig {
    type Err = UnknownConfig;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownConfig {
                kind: "compressor",
                label: s.to_string(),
            })
    }
}

impl FromStr for TurbineConfig {
    type Err = UnknownConfig;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownConfig {
                kind: "turbine",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for CompressorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for TurbineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Apply a parameter set, reporting failures against `system`.
pub fn apply_preset(system: &mut dyn System, params: ConfigResult<ParameterSet>) -> SystemResult<()> {
    let name = system.name().to_string();
    let result = params.and_then(|p| {
        apply(system, &p)?;
        Ok(p.len())
    });
    match result {
        Ok(count) => {
            debug!(system = %name, count, "preset applied");
            Ok(())
        }
        Err(ConfigError::System(e)) => Err(e),
        Err(e) => Err(SystemError::Connection {
            system: name,
            what: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for c in CompressorConfig::ALL {
            assert_eq!(c.label().parse::<CompressorConfig>().unwrap(), c);
        }
        for t in TurbineConfig::ALL {
            assert_eq!(t.to_string().parse::<TurbineConfig>().unwrap(), t);
        }
        assert!("lpc".parse::<CompressorConfig>().is_err());
    }

    #[test]
    fn every_preset_parses() {
        for c in CompressorConfig::ALL {
            let p = c.parameters().unwrap();
            assert!(p.get("fl_in.w").is_some(), "{c}");
            assert!(p.get("kp.inlet_tip.r").is_some(), "{c}");
        }
        for t in TurbineConfig::ALL {
            let p = t.parameters().unwrap();
            assert!(p.get("aero.ncdes").is_some(), "{t}");
        }
    }

    #[test]
    fn fan_preset_values() {
        let p = CompressorConfig::Fan.parameters().unwrap();
        assert_eq!(p.get("sh_in.power"), Some(15.75e6));
        assert_eq!(p.get("geom.blade_hub_to_tip_ratio"), Some(0.3));
    }
}
