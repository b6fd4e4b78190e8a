//! Port records exchanged between components.
//!
//! Ports are plain value types: a component reads its inlet ports and
//! returns fresh outlet ports from each compute.

use crate::Real;
use crate::units::{self, Area, MassRate, Power, Pressure, Temperature};
use std::f64::consts::PI;

/// Total state of a gas stream.
///
/// `pt` (Pa) and `tt` (K) must be strictly positive for any compute that
/// uses them. `w` (kg/s) is frequently an unknown of the equation system.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FluidState {
    /// Total pressure (Pa)
    pub pt: Real,
    /// Total temperature (K)
    pub tt: Real,
    /// Mass flow (kg/s)
    pub w: Real,
}

impl Default for FluidState {
    fn default() -> Self {
        Self {
            pt: units::constants::P_ISA_SL,
            tt: units::constants::T_ISA_SL,
            w: 1.0,
        }
    }
}

impl FluidState {
    pub fn new(pt: Real, tt: Real, w: Real) -> Self {
        Self { pt, tt, w }
    }

    /// Same thermodynamic state carrying a different mass flow.
    pub fn with_flow(self, w: Real) -> Self {
        Self { w, ..self }
    }

    pub fn pressure(&self) -> Pressure {
        units::pa(self.pt)
    }

    pub fn temperature(&self) -> Temperature {
        units::k(self.tt)
    }

    pub fn mass_flow(&self) -> MassRate {
        units::kgps(self.w)
    }
}

crate::variables!(FluidState { pt, tt, w });

/// Mechanical shaft state.
///
/// Power is positive when it flows from the driver to the consumer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShaftState {
    /// Rotational speed (rpm)
    pub n: Real,
    /// Transmitted power (W)
    pub power: Real,
}

impl Default for ShaftState {
    fn default() -> Self {
        Self {
            n: 10_000.0,
            power: 1.0e6,
        }
    }
}

impl ShaftState {
    pub fn new(n: Real, power: Real) -> Self {
        Self { n, power }
    }

    /// Angular velocity (rad/s)
    pub fn omega(&self) -> Real {
        units::rpm_to_rad_s(self.n)
    }

    pub fn shaft_power(&self) -> Power {
        units::watt(self.power)
    }
}

crate::variables!(ShaftState { n, power });

/// Meridional position: radius `r` and axial coordinate `z` (m).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keypoint {
    pub r: Real,
    pub z: Real,
}

impl Default for Keypoint {
    fn default() -> Self {
        Self { r: 1.0, z: 1.0 }
    }
}

impl Keypoint {
    pub fn new(r: Real, z: Real) -> Self {
        Self { r, z }
    }

    /// Offset by `(dr, dz)`.
    pub fn offset(self, dr: Real, dz: Real) -> Self {
        Self {
            r: self.r + dr,
            z: self.z + dz,
        }
    }

    /// Same radius, shifted axially.
    pub fn shifted(self, dz: Real) -> Self {
        self.offset(0.0, dz)
    }
}

crate::variables!(Keypoint { r, z });

/// Keypoint carrying the local wall slope `dr/dz` for C1 continuity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct C1Keypoint {
    pub r: Real,
    pub z: Real,
    pub drdz: Real,
}

impl C1Keypoint {
    pub fn new(at: Keypoint, drdz: Real) -> Self {
        Self {
            r: at.r,
            z: at.z,
            drdz,
        }
    }

    pub fn position(&self) -> Keypoint {
        Keypoint::new(self.r, self.z)
    }
}

crate::variables!(C1Keypoint { r, z, drdz });

/// Envelope of an annular component: hub and tip at inlet and exit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeypointSet {
    pub inlet_hub: Keypoint,
    pub inlet_tip: Keypoint,
    pub exit_hub: Keypoint,
    pub exit_tip: Keypoint,
}

impl Default for KeypointSet {
    fn default() -> Self {
        Self {
            inlet_hub: Keypoint::new(0.5, 0.0),
            inlet_tip: Keypoint::new(1.0, 0.0),
            exit_hub: Keypoint::new(0.5, 1.0),
            exit_tip: Keypoint::new(1.0, 1.0),
        }
    }
}

impl KeypointSet {
    /// Annulus area at inlet (m²).
    pub fn inlet_area(&self) -> Area {
        units::m2(annulus(self.inlet_tip.r, self.inlet_hub.r))
    }

    /// Annulus area at exit (m²).
    pub fn exit_area(&self) -> Area {
        units::m2(annulus(self.exit_tip.r, self.exit_hub.r))
    }

    /// Axial extent along the tip line (m).
    pub fn length(&self) -> Real {
        self.exit_tip.z - self.inlet_tip.z
    }
}

crate::variables!(KeypointSet {} nested { inlet_hub, inlet_tip, exit_hub, exit_tip });

/// Area of the annulus between `r_tip` and `r_hub`.
pub fn annulus(r_tip: Real, r_hub: Real) -> Real {
    PI * (r_tip * r_tip - r_hub * r_hub)
}
