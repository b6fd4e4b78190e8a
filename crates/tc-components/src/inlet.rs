//! Engine intake.

use crate::common::{check_fraction, check_positive};
use crate::error::ComponentResult;
use tc_core::{FluidState, Real, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct InletInputs {
    pub fl_in: FluidState,
    /// Total pressure recovery, in `[0, 1]`
    pub recovery: Real,
    /// Flight speed (m/s)
    pub flight_speed: Real,
}

impl Default for InletInputs {
    fn default() -> Self {
        Self {
            fl_in: FluidState::default(),
            recovery: 0.995,
            flight_speed: 0.0,
        }
    }
}

variables!(InletInputs { recovery, flight_speed } nested { fl_in });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InletOutputs {
    pub fl_out: FluidState,
    /// Momentum drag of the captured stream (N)
    pub ram_drag: Real,
}

variables!(InletOutputs { ram_drag } nested { fl_out });

#[derive(Clone, Debug)]
pub struct Inlet {
    name: String,
    pub inputs: InletInputs,
}

impl Inlet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: InletInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<InletOutputs> {
        let fl = self.inputs.fl_in;
        let recovery = check_fraction(self.inputs.recovery, "pressure recovery", true)?;
        check_positive(fl.pt * recovery, "inlet exit pressure")?;
        Ok(InletOutputs {
            fl_out: FluidState::new(fl.pt * recovery, fl.tt, fl.w),
            ram_drag: fl.w * self.inputs.flight_speed,
        })
    }
}

impl Component for Inlet {
    type Inputs = InletInputs;
    type Outputs = InletOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &InletInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut InletInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<InletOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}
