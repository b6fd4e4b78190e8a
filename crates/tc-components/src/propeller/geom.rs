//! Propeller disk geometry.

use crate::common::check_positive;
use crate::error::{ComponentError, ComponentResult};
use tc_core::ports::annulus;
use tc_core::{Keypoint, KeypointSet, Real, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct PropellerGeomInputs {
    pub kp: KeypointSet,
}

impl Default for PropellerGeomInputs {
    fn default() -> Self {
        Self {
            kp: KeypointSet {
                inlet_hub: Keypoint::new(0.25, 0.0),
                inlet_tip: Keypoint::new(2.5, 0.0),
                exit_hub: Keypoint::new(0.25, 0.2),
                exit_tip: Keypoint::new(2.5, 0.2),
            },
        }
    }
}

variables!(PropellerGeomInputs {} nested { kp });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropellerGeomOutputs {
    pub radius: Real,
    pub inlet_area: Real,
}

variables!(PropellerGeomOutputs { radius, inlet_area });

/// Blade tip radius and swept disk area (spinner removed).
#[derive(Clone, Debug)]
pub struct PropellerGeom {
    name: String,
    pub inputs: PropellerGeomInputs,
}

impl PropellerGeom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: PropellerGeomInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<PropellerGeomOutputs> {
        let kp = &self.inputs.kp;
        let radius = check_positive(kp.inlet_tip.r, "propeller radius")?;
        if kp.inlet_hub.r < 0.0 || kp.inlet_hub.r >= radius {
            return Err(ComponentError::Domain {
                what: "spinner radius",
                value: kp.inlet_hub.r,
            });
        }
        Ok(PropellerGeomOutputs {
            radius,
            inlet_area: annulus(radius, kp.inlet_hub.r),
        })
    }
}

impl Component for PropellerGeom {
    type Inputs = PropellerGeomInputs;
    type Outputs = PropellerGeomOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &PropellerGeomInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut PropellerGeomInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<PropellerGeomOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn disk_area() {
        let out = PropellerGeom::new("geom").run().unwrap();
        assert_eq!(out.radius, 2.5);
        assert!((out.inlet_area - PI * (6.25 - 0.0625)).abs() < 1e-12);
    }
}
