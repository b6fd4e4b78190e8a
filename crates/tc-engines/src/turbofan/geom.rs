//! Separate-flow turbofan envelope.

use crate::turboprop::cowl_slope;
use tc_components::common::{check_fraction, check_positive};
use tc_components::{ComponentError, ComponentResult};
use tc_core::ports::annulus;
use tc_core::{C1Keypoint, Keypoint, KeypointSet, Real, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct TurbofanGeomInputs {
    /// Fan tip diameter (m)
    pub fan_diameter: Real,
    /// Fan inlet hub radius over fan radius
    pub fan_hub_ratio: Real,
    /// Fan exit hub radius over fan radius
    pub fan_exit_hub_ratio: Real,
    /// Fan exit tip radius over fan radius
    pub fan_exit_tip_ratio: Real,
    /// Fan module length over fan radius
    pub fan_module_length_ratio: Real,
    /// Bypass duct hub radius at the OGV exit over fan radius
    pub ogv_exit_hqt: Real,
    /// Core length (fan exit to turbine exit) over fan radius
    pub core_length_ratio: Real,
    /// Turbine exit tip radius over fan radius
    pub turbine_exit_radius_ratio: Real,
    /// Turbine exit hub-to-tip ratio
    pub turbine_fp_exit_hqt: Real,
    pub primary_nozzle_length_ratio: Real,
    pub secondary_nozzle_length_ratio: Real,
    /// Bypass cowl angle to the axis (deg), negative when closing
    pub cowl_slope: Real,
    /// Primary nozzle exit area over turbine exit annulus
    pub pri_nozzle_area_ratio: Real,
    /// Secondary nozzle exit area over bypass duct annulus
    pub sec_nozzle_area_ratio: Real,
}

impl Default for TurbofanGeomInputs {
    fn default() -> Self {
        Self {
            fan_diameter: 2.0,
            fan_hub_ratio: 0.3,
            fan_exit_hub_ratio: 0.35,
            fan_exit_tip_ratio: 0.95,
            fan_module_length_ratio: 0.4,
            ogv_exit_hqt: 0.6,
            core_length_ratio: 2.0,
            turbine_exit_radius_ratio: 0.45,
            turbine_fp_exit_hqt: 0.5,
            primary_nozzle_length_ratio: 0.3,
            secondary_nozzle_length_ratio: 0.3,
            cowl_slope: -12.0,
            pri_nozzle_area_ratio: 0.9,
            sec_nozzle_area_ratio: 0.4,
        }
    }
}

variables!(TurbofanGeomInputs {
    fan_diameter,
    fan_hub_ratio,
    fan_exit_hub_ratio,
    fan_exit_tip_ratio,
    fan_module_length_ratio,
    ogv_exit_hqt,
    core_length_ratio,
    turbine_exit_radius_ratio,
    turbine_fp_exit_hqt,
    primary_nozzle_length_ratio,
    secondary_nozzle_length_ratio,
    cowl_slope,
    pri_nozzle_area_ratio,
    sec_nozzle_area_ratio,
});

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurbofanGeomOutputs {
    pub fan_kp: KeypointSet,
    pub primary_nozzle_kp: KeypointSet,
    pub secondary_nozzle_kp: KeypointSet,
    /// End of the bypass cowl, with its slope
    pub sec_nozzle_exit: C1Keypoint,
    pub fan_module_length: Real,
    pub engine_length: Real,
}

variables!(TurbofanGeomOutputs { fan_module_length, engine_length } nested {
    fan_kp,
    primary_nozzle_kp,
    secondary_nozzle_kp,
    sec_nozzle_exit,
});

/// Fan module, bypass nozzle and core nozzle keypoints from the fan radius.
///
/// The bypass nozzle starts at the OGV exit, the core nozzle at the
/// turbine exit `core_length_ratio` fan radii downstream. Both exit tip
/// radii come from their area ratios. The bypass cowl is clamped like the
/// turboprop core cowl.
#[derive(Clone, Debug)]
pub struct TurbofanGeom {
    name: String,
    pub inputs: TurbofanGeomInputs,
}

impl TurbofanGeom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: TurbofanGeomInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<TurbofanGeomOutputs> {
        let i = &self.inputs;
        let r_fan = check_positive(i.fan_diameter, "fan diameter")? / 2.0;
        let fan_length = r_fan * check_positive(i.fan_module_length_ratio, "fan module length ratio")?;
        let fan_kp = KeypointSet {
            inlet_hub: Keypoint::new(r_fan * check_fraction(i.fan_hub_ratio, "fan hub ratio", false)?, 0.0),
            inlet_tip: Keypoint::new(r_fan, 0.0),
            exit_hub: Keypoint::new(r_fan * i.fan_exit_hub_ratio, fan_length),
            exit_tip: Keypoint::new(r_fan * i.fan_exit_tip_ratio, fan_length),
        };

        let duct_hub = r_fan * check_fraction(i.ogv_exit_hqt, "OGV exit hub to tip ratio", false)?;
        let duct_tip = fan_kp.exit_tip.r;
        let sec_length = r_fan * check_positive(i.secondary_nozzle_length_ratio, "secondary nozzle length ratio")?;
        let sec_exit_r = exit_radius(i.sec_nozzle_area_ratio, duct_tip, duct_hub, "secondary nozzle area ratio")?;
        let secondary_nozzle_kp = KeypointSet {
            inlet_hub: Keypoint::new(duct_hub, fan_length),
            inlet_tip: fan_kp.exit_tip,
            exit_hub: Keypoint::new(duct_hub, fan_length + sec_length),
            exit_tip: Keypoint::new(sec_exit_r, fan_length + sec_length),
        };

        let slope = cowl_slope(i.cowl_slope)?;
        let dz = ((sec_exit_r - duct_tip) / slope).max(sec_length);
        let sec_nozzle_exit = C1Keypoint::new(fan_kp.exit_tip.offset(dz * slope, dz), slope);

        let turbine_tip = r_fan * check_positive(i.turbine_exit_radius_ratio, "turbine exit radius ratio")?;
        let turbine_hub = turbine_tip * check_fraction(i.turbine_fp_exit_hqt, "turbine exit hub to tip ratio", false)?;
        let core_end = fan_length + r_fan * check_positive(i.core_length_ratio, "core length ratio")?;
        let pri_length = r_fan * check_positive(i.primary_nozzle_length_ratio, "primary nozzle length ratio")?;
        let pri_exit_r = exit_radius(i.pri_nozzle_area_ratio, turbine_tip, turbine_hub, "primary nozzle area ratio")?;
        let primary_nozzle_kp = KeypointSet {
            inlet_hub: Keypoint::new(turbine_hub, core_end),
            inlet_tip: Keypoint::new(turbine_tip, core_end),
            exit_hub: Keypoint::new(turbine_hub, core_end + pri_length),
            exit_tip: Keypoint::new(pri_exit_r, core_end + pri_length),
        };

        Ok(TurbofanGeomOutputs {
            fan_kp,
            primary_nozzle_kp,
            secondary_nozzle_kp,
            sec_nozzle_exit,
            fan_module_length: fan_length,
            engine_length: (core_end + pri_length).max(sec_nozzle_exit.z),
        })
    }
}

/// Exit tip radius giving `ratio` times the inlet annulus over the same hub.
fn exit_radius(ratio: Real, r_tip: Real, r_hub: Real, what: &'static str) -> ComponentResult<Real> {
    if ratio.is_nan() || ratio <= 0.0 {
        return Err(ComponentError::Domain { what, value: ratio });
    }
    Ok((ratio * annulus(r_tip, r_hub) / std::f64::consts::PI + r_hub * r_hub).sqrt())
}

impl Component for TurbofanGeom {
    type Inputs = TurbofanGeomInputs;
    type Outputs = TurbofanGeomOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &TurbofanGeomInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut TurbofanGeomInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<TurbofanGeomOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}
