//! Turbine inlet annulus.

use crate::common::{check_fraction, check_positive};
use crate::error::{ComponentError, ComponentResult};
use std::f64::consts::PI;
use tc_core::{KeypointSet, Real, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct TurbineGeomInputs {
    pub kp: KeypointSet,
    /// Blade height over the keypoint channel height, in `[0, 1]`
    pub blade_height_ratio: Real,
}

impl Default for TurbineGeomInputs {
    fn default() -> Self {
        Self {
            kp: KeypointSet::default(),
            blade_height_ratio: 0.5,
        }
    }
}

variables!(TurbineGeomInputs { blade_height_ratio } nested { kp });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurbineGeomOutputs {
    pub blade_height: Real,
    pub mean_radius: Real,
    pub area_in: Real,
}

variables!(TurbineGeomOutputs { blade_height, mean_radius, area_in });

/// Blade row hanging from the inlet tip radius.
#[derive(Clone, Debug)]
pub struct TurbineGeom {
    name: String,
    pub inputs: TurbineGeomInputs,
}

impl TurbineGeom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: TurbineGeomInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<TurbineGeomOutputs> {
        let kp = &self.inputs.kp;
        let ratio = check_fraction(self.inputs.blade_height_ratio, "blade height ratio", true)?;
        let r_tip = check_positive(kp.inlet_tip.r, "inlet tip radius")?;
        let channel = r_tip - kp.inlet_hub.r;
        if channel <= 0.0 {
            return Err(ComponentError::Domain {
                what: "turbine channel height",
                value: channel,
            });
        }
        let h = ratio * channel;
        let r_root = r_tip - h;
        Ok(TurbineGeomOutputs {
            blade_height: h,
            mean_radius: r_tip - 0.5 * h,
            area_in: PI * (r_tip * r_tip - r_root * r_root),
        })
    }
}

impl Component for TurbineGeom {
    type Inputs = TurbineGeomInputs;
    type Outputs = TurbineGeomOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &TurbineGeomInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut TurbineGeomInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<TurbineGeomOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}
