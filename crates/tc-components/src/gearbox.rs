//! Power gearbox.

use crate::common::check_positive;
use crate::error::ComponentResult;
use tc_core::{Real, ShaftState, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct GearboxInputs {
    pub sh_in: ShaftState,
    /// Input speed over output speed
    pub speed_ratio: Real,
}

impl Default for GearboxInputs {
    fn default() -> Self {
        Self {
            sh_in: ShaftState::default(),
            speed_ratio: 1.0,
        }
    }
}

variables!(GearboxInputs { speed_ratio } nested { sh_in });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GearboxOutputs {
    pub sh_out: ShaftState,
}

variables!(GearboxOutputs {} nested { sh_out });

/// Lossless speed reduction: `sh_out.n = sh_in.n / speed_ratio`.
#[derive(Clone, Debug)]
pub struct Gearbox {
    name: String,
    pub inputs: GearboxInputs,
}

impl Gearbox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: GearboxInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<GearboxOutputs> {
        let ratio = check_positive(self.inputs.speed_ratio, "speed ratio")?;
        Ok(GearboxOutputs {
            sh_out: ShaftState::new(self.inputs.sh_in.n / ratio, self.inputs.sh_in.power),
        })
    }
}

impl Component for Gearbox {
    type Inputs = GearboxInputs;
    type Outputs = GearboxOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &GearboxInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut GearboxInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<GearboxOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}
