//! Nozzle exit geometry.

use crate::common::check_positive;
use crate::error::{ComponentError, ComponentResult};
use tc_core::ports::annulus;
use tc_core::{Keypoint, KeypointSet, Real, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct NozzleGeomInputs {
    pub kp: KeypointSet,
}

impl Default for NozzleGeomInputs {
    fn default() -> Self {
        Self {
            kp: KeypointSet {
                inlet_hub: Keypoint::new(0.0, 0.0),
                inlet_tip: Keypoint::new(0.3, 0.0),
                exit_hub: Keypoint::new(0.0, 0.4),
                exit_tip: Keypoint::new(0.25, 0.4),
            },
        }
    }
}

variables!(NozzleGeomInputs {} nested { kp });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NozzleGeomOutputs {
    /// Exit annulus area (m²)
    pub area: Real,
    pub length: Real,
}

variables!(NozzleGeomOutputs { area, length });

#[derive(Clone, Debug)]
pub struct NozzleGeom {
    name: String,
    pub inputs: NozzleGeomInputs,
}

impl NozzleGeom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: NozzleGeomInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<NozzleGeomOutputs> {
        let kp = &self.inputs.kp;
        if kp.exit_hub.r < 0.0 {
            return Err(ComponentError::Domain {
                what: "exit hub radius",
                value: kp.exit_hub.r,
            });
        }
        let area = check_positive(annulus(kp.exit_tip.r, kp.exit_hub.r), "nozzle exit area")?;
        Ok(NozzleGeomOutputs {
            area,
            length: kp.length(),
        })
    }
}

impl Component for NozzleGeom {
    type Inputs = NozzleGeomInputs;
    type Outputs = NozzleGeomOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &NozzleGeomInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut NozzleGeomInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<NozzleGeomOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}
