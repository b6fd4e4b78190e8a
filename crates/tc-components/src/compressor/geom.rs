//! Compressor annulus geometry.

use crate::common::{check_fraction, check_positive};
use crate::error::{ComponentError, ComponentResult};
use std::f64::consts::PI;
use tc_core::{KeypointSet, Real, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct CompressorGeomInputs {
    pub kp: KeypointSet,
    /// Inlet hub radius over inlet tip radius, in `[0, 1)`
    pub blade_hub_to_tip_ratio: Real,
}

impl Default for CompressorGeomInputs {
    fn default() -> Self {
        Self {
            kp: KeypointSet::default(),
            blade_hub_to_tip_ratio: 0.5,
        }
    }
}

variables!(CompressorGeomInputs { blade_hub_to_tip_ratio } nested { kp });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompressorGeomOutputs {
    pub tip_in_r: Real,
    pub hub_in_r: Real,
    pub tip_out_r: Real,
    pub inlet_area: Real,
    pub length: Real,
}

variables!(CompressorGeomOutputs { tip_in_r, hub_in_r, tip_out_r, inlet_area, length });

/// Inlet annulus from the tip keypoints and a hub-to-tip ratio.
///
/// ```text
/// hub_in_r   = ratio * tip_in_r
/// inlet_area = pi * (tip_in_r^2 - hub_in_r^2)
/// ```
#[derive(Clone, Debug)]
pub struct CompressorGeom {
    name: String,
    pub inputs: CompressorGeomInputs,
}

impl CompressorGeom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: CompressorGeomInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<CompressorGeomOutputs> {
        let kp = &self.inputs.kp;
        let ratio = check_fraction(self.inputs.blade_hub_to_tip_ratio, "hub to tip ratio", false)?;
        let tip_in_r = check_positive(kp.inlet_tip.r, "inlet tip radius")?;
        let tip_out_r = check_positive(kp.exit_tip.r, "exit tip radius")?;
        let hub_in_r = ratio * tip_in_r;
        let length = kp.exit_tip.z - kp.inlet_tip.z;
        if length < 0.0 {
            return Err(ComponentError::Domain {
                what: "compressor length",
                value: length,
            });
        }

        Ok(CompressorGeomOutputs {
            tip_in_r,
            hub_in_r,
            tip_out_r,
            inlet_area: PI * (tip_in_r * tip_in_r - hub_in_r * hub_in_r),
            length,
        })
    }
}

impl Component for CompressorGeom {
    type Inputs = CompressorGeomInputs;
    type Outputs = CompressorGeomOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &CompressorGeomInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut CompressorGeomInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<CompressorGeomOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annulus_from_ratio() {
        let mut g = CompressorGeom::new("geom");
        g.inputs.kp.inlet_tip.r = 1.0;
        g.inputs.blade_hub_to_tip_ratio = 0.3;
        let out = g.run().unwrap();
        assert!((out.hub_in_r - 0.3).abs() < 1e-12);
        assert!((out.inlet_area - PI * 0.91).abs() < 1e-12);
        assert!((out.length - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ratio_of_one_closes_the_annulus() {
        let mut g = CompressorGeom::new("geom");
        g.inputs.blade_hub_to_tip_ratio = 1.0;
        assert!(matches!(g.run(), Err(ComponentError::Domain { .. })));
    }
}
