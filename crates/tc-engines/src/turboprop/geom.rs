//! Turboprop envelope from the propeller diameter and a few ratios.

use tc_components::common::{check_fraction, check_positive};
use tc_components::{ComponentError, ComponentResult};
use tc_core::ports::annulus;
use tc_core::{C1Keypoint, Keypoint, KeypointSet, Real, units, variables};
use tc_system::{Component, SystemResult};

#[derive(Clone, Debug, PartialEq)]
pub struct TurbopropGeomInputs {
    /// Propeller diameter (m)
    pub propeller_diameter: Real,
    /// Propeller module length over propeller radius
    pub propeller_length_ratio: Real,
    /// Core inlet tip radius over propeller radius
    pub core_inlet_radius_ratio: Real,
    /// Core exit tip radius over core inlet tip radius
    pub core_exit_radius_ratio: Real,
    /// Core length over core inlet tip radius
    pub core_length_ratio: Real,
    /// Shaft (hub) radius over propeller radius
    pub shaft_radius_ratio: Real,
    /// Core cowl angle to the axis (deg), negative when closing
    pub core_cowl_slope: Real,
    /// Primary nozzle length over core inlet tip radius
    pub primary_nozzle_length_ratio: Real,
    /// Primary nozzle exit area over core exit annulus area
    pub pri_nozzle_area_ratio: Real,
}

impl Default for TurbopropGeomInputs {
    fn default() -> Self {
        Self {
            propeller_diameter: 5.0,
            propeller_length_ratio: 0.2,
            core_inlet_radius_ratio: 0.25,
            core_exit_radius_ratio: 1.0,
            core_length_ratio: 3.0,
            shaft_radius_ratio: 0.1,
            core_cowl_slope: -20.0,
            primary_nozzle_length_ratio: 0.5,
            pri_nozzle_area_ratio: 0.25,
        }
    }
}

variables!(TurbopropGeomInputs {
    propeller_diameter,
    propeller_length_ratio,
    core_inlet_radius_ratio,
    core_exit_radius_ratio,
    core_length_ratio,
    shaft_radius_ratio,
    core_cowl_slope,
    primary_nozzle_length_ratio,
    pri_nozzle_area_ratio,
});

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurbopropGeomOutputs {
    pub propeller_kp: KeypointSet,
    pub core_kp: KeypointSet,
    pub primary_nozzle_kp: KeypointSet,
    /// End of the core cowl, with its slope
    pub pri_nozzle_exit: C1Keypoint,
    pub propeller_module_length: Real,
    pub engine_length: Real,
}

variables!(TurbopropGeomOutputs { propeller_module_length, engine_length } nested {
    propeller_kp,
    core_kp,
    primary_nozzle_kp,
    pri_nozzle_exit,
});

/// Keypoint chain of a tractor turboprop: propeller disk, core duct and
/// primary nozzle, front to back.
///
/// The nozzle exit tip radius gives `pri_nozzle_area_ratio` times the core
/// exit annulus. The cowl runs from the core exit tip at
/// `core_cowl_slope`; it is at least long enough to reach the nozzle exit
/// radius, so `dz = max((r_exit - r_core_exit) / slope, nozzle_length)`.
#[derive(Clone, Debug)]
pub struct TurbopropGeom {
    name: String,
    pub inputs: TurbopropGeomInputs,
}

impl TurbopropGeom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: TurbopropGeomInputs::default(),
        }
    }

    pub fn run(&self) -> ComponentResult<TurbopropGeomOutputs> {
        let i = &self.inputs;
        let r_prop = check_positive(i.propeller_diameter, "propeller diameter")? / 2.0;
        let prop_length = r_prop * check_positive(i.propeller_length_ratio, "propeller length ratio")?;
        let r_hub = r_prop * check_fraction(i.shaft_radius_ratio, "shaft radius ratio", false)?;

        let r_core_in = r_prop * check_positive(i.core_inlet_radius_ratio, "core inlet radius ratio")?;
        let r_core_out = r_core_in * check_positive(i.core_exit_radius_ratio, "core exit radius ratio")?;
        if r_hub >= r_core_in.min(r_core_out) {
            return Err(ComponentError::Domain {
                what: "core channel height",
                value: r_core_in.min(r_core_out) - r_hub,
            });
        }
        let core_length = r_core_in * check_positive(i.core_length_ratio, "core length ratio")?;

        let propeller_kp = KeypointSet {
            inlet_hub: Keypoint::new(r_hub, 0.0),
            inlet_tip: Keypoint::new(r_prop, 0.0),
            exit_hub: Keypoint::new(r_hub, prop_length),
            exit_tip: Keypoint::new(r_prop, prop_length),
        };
        let core_kp = KeypointSet {
            inlet_hub: propeller_kp.exit_hub,
            inlet_tip: Keypoint::new(r_core_in, prop_length),
            exit_hub: propeller_kp.exit_hub.shifted(core_length),
            exit_tip: Keypoint::new(r_core_out, prop_length + core_length),
        };

        let area_ratio = check_positive(i.pri_nozzle_area_ratio, "primary nozzle area ratio")?;
        let r_exit = (area_ratio * annulus(r_core_out, r_hub) / std::f64::consts::PI + r_hub * r_hub).sqrt();
        let nozzle_length = r_core_in * check_positive(i.primary_nozzle_length_ratio, "primary nozzle length ratio")?;
        let primary_nozzle_kp = KeypointSet {
            inlet_hub: core_kp.exit_hub,
            inlet_tip: core_kp.exit_tip,
            exit_hub: core_kp.exit_hub.shifted(nozzle_length),
            exit_tip: Keypoint::new(r_exit, core_kp.exit_tip.z + nozzle_length),
        };

        let slope = cowl_slope(i.core_cowl_slope)?;
        let min_dz = (r_exit - r_core_out) / slope;
        let dz = min_dz.max(nozzle_length);
        let pri_nozzle_exit = C1Keypoint::new(core_kp.exit_tip.offset(dz * slope, dz), slope);

        Ok(TurbopropGeomOutputs {
            propeller_kp,
            core_kp,
            primary_nozzle_kp,
            pri_nozzle_exit,
            propeller_module_length: prop_length,
            engine_length: pri_nozzle_exit.z,
        })
    }
}

/// `dr/dz` of a closing cowl; the angle must lie in `(-90, 0)` degrees.
pub(crate) fn cowl_slope(angle_deg: Real) -> ComponentResult<Real> {
    if angle_deg.is_nan() || angle_deg >= 0.0 || angle_deg <= -90.0 {
        return Err(ComponentError::Domain {
            what: "cowl slope",
            value: angle_deg,
        });
    }
    Ok(units::slope_from_deg(angle_deg))
}

impl Component for TurbopropGeom {
    type Inputs = TurbopropGeomInputs;
    type Outputs = TurbopropGeomOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &TurbopropGeomInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut TurbopropGeomInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<TurbopropGeomOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }
}
