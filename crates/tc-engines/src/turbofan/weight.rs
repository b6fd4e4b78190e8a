//! Turbofan mass estimate from its envelope.

use std::f64::consts::PI;
use tc_components::ComponentResult;
use tc_components::common::{check_finite, check_positive};
use tc_core::{Real, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct TurbofanWeightInputs {
    /// Fan tip diameter (m)
    pub fan_diameter: Real,
    /// Fan module axial length (m)
    pub fan_module_length: Real,
    /// Overall engine length (m)
    pub engine_length: Real,
    /// Fan module mass per unit of swept fan volume (kg/m³)
    pub fan_density: Real,
    /// Core and nozzles mass per unit of fan diameter and length (kg/m²)
    pub core_density: Real,
}

impl Default for TurbofanWeightInputs {
    fn default() -> Self {
        Self {
            fan_diameter: 2.0,
            fan_module_length: 0.4,
            engine_length: 2.7,
            fan_density: 1500.0,
            core_density: 700.0,
        }
    }
}

variables!(TurbofanWeightInputs {
    fan_diameter, fan_module_length, engine_length, fan_density, core_density
});

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurbofanWeightOutputs {
    /// Fan module mass (kg)
    pub fan: Real,
    /// Mass downstream of the fan module (kg)
    pub core: Real,
    pub total: Real,
}

variables!(TurbofanWeightOutputs { fan, core, total });

/// Two-term mass correlation.
///
/// ```text
/// fan  = fan_density  * pi/4 * D^2 * L_fan
/// core = core_density * D * (L_engine - L_fan)
/// ```
#[derive(Clone, Debug)]
pub struct TurbofanWeight {
    name: String,
    pub inputs: TurbofanWeightInputs,
}

impl TurbofanWeight {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: TurbofanWeightInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<TurbofanWeightOutputs> {
        let i = &self.inputs;
        let d = check_positive(i.fan_diameter, "fan diameter")?;
        let fan_length = check_positive(i.fan_module_length, "fan module length")?;
        let core_length = check_positive(i.engine_length - fan_length, "core length")?;

        let fan = check_finite(i.fan_density * PI / 4.0 * d * d * fan_length, "fan mass")?;
        let core = check_finite(i.core_density * d * core_length, "core mass")?;
        Ok(TurbofanWeightOutputs {
            fan,
            core,
            total: fan + core,
        })
    }
}

impl Component for TurbofanWeight {
    type Inputs = TurbofanWeightInputs;
    type Outputs = TurbofanWeightOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &TurbofanWeightInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut TurbofanWeightInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<TurbofanWeightOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}
