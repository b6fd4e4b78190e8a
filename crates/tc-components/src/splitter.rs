//! Core/bypass flow splitter.

use crate::common::check_positive;
use crate::error::{ComponentError, ComponentResult};
use tc_core::{FluidState, Real, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct SplitterInputs {
    pub fl_in: FluidState,
    /// Bypass over core mass flow
    pub bpr: Real,
}

impl Default for SplitterInputs {
    fn default() -> Self {
        Self {
            fl_in: FluidState::default(),
            bpr: 5.0,
        }
    }
}

variables!(SplitterInputs { bpr } nested { fl_in });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitterOutputs {
    pub fl_core: FluidState,
    pub fl_bypass: FluidState,
}

variables!(SplitterOutputs {} nested { fl_core, fl_bypass });

/// Both streams keep the inlet total state.
#[derive(Clone, Debug)]
pub struct Splitter {
    name: String,
    pub inputs: SplitterInputs,
}

impl Splitter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: SplitterInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<SplitterOutputs> {
        let fl = self.inputs.fl_in;
        let bpr = self.inputs.bpr;
        if bpr.is_nan() || bpr < 0.0 {
            return Err(ComponentError::Domain {
                what: "bypass ratio",
                value: bpr,
            });
        }
        let w = check_positive(fl.w, "mass flow")?;
        let w_core = w / (1.0 + bpr);
        Ok(SplitterOutputs {
            fl_core: fl.with_flow(w_core),
            fl_bypass: fl.with_flow(w - w_core),
        })
    }
}

impl Component for Splitter {
    type Inputs = SplitterInputs;
    type Outputs = SplitterOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &SplitterInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut SplitterInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<SplitterOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}
