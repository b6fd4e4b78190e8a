//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use tc_core::{Real, ensure_finite, ensure_positive, units};

/// Scalar fields of a fluid port, for `Assembly::connect_port`.
pub const FLUID_FIELDS: [&str; 3] = ["pt", "tt", "w"];

/// Scalar fields of a shaft port.
pub const SHAFT_FIELDS: [&str; 2] = ["n", "power"];

/// Scalar fields of a keypoint set.
pub const KEYPOINT_FIELDS: [&str; 8] = [
    "inlet_hub.r",
    "inlet_hub.z",
    "inlet_tip.r",
    "inlet_tip.z",
    "exit_hub.r",
    "exit_hub.z",
    "exit_tip.r",
    "exit_tip.z",
];

/// Ensure a computed value is finite.
pub fn check_finite(value: Real, what: &'static str) -> ComponentResult<Real> {
    Ok(ensure_finite(value, what)?)
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: Real, what: &'static str) -> ComponentResult<Real> {
    Ok(ensure_positive(value, what)?)
}

/// Ensure `0 <= value < 1`, or `0 <= value <= 1` when `upper_inclusive`.
pub fn check_fraction(value: Real, what: &'static str, upper_inclusive: bool) -> ComponentResult<Real> {
    let value = check_finite(value, what)?;
    let in_range = value >= 0.0 && (value < 1.0 || (upper_inclusive && value <= 1.0));
    if in_range {
        Ok(value)
    } else {
        Err(ComponentError::Domain { what, value })
    }
}

/// Blade speed (m/s) at `radius` for shaft speed `n` (rpm).
pub fn blade_speed(n: Real, radius: Real) -> ComponentResult<Real> {
    check_positive(units::rpm_to_rad_s(n) * radius, "blade speed")
}

/// Flow coefficient `vm / u` with `vm = w / (rho * area)`.
pub fn flow_coefficient(w: Real, rho: Real, area: Real, u: Real) -> ComponentResult<Real> {
    let area = check_positive(area, "flow area")?;
    check_finite(w / (rho * area) / u, "flow coefficient")
}

/// Load coefficient `dh / (stages * u^2)`.
pub fn load_coefficient(dh: Real, stage_count: Real, u: Real) -> ComponentResult<Real> {
    let stages = check_positive(stage_count, "stage count")?;
    check_finite(dh / (stages * u * u), "load coefficient")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_fraction() {
        assert!(check_fraction(0.5, "ratio", false).is_ok());
        assert!(check_fraction(1.0, "ratio", false).is_err());
        assert!(check_fraction(1.0, "ratio", true).is_ok());
        assert!(check_fraction(-0.1, "ratio", true).is_err());
    }

    #[test]
    fn test_coefficients() {
        // 3000 rpm at 1 m: u = 100 pi
        let u = blade_speed(3000.0, 1.0).unwrap();
        assert!((u - 100.0 * std::f64::consts::PI).abs() < 1e-9);
        assert!((flow_coefficient(12.0, 1.2, 2.0, 10.0).unwrap() - 0.5).abs() < 1e-12);
        assert!((load_coefficient(800.0, 2.0, 20.0).unwrap() - 1.0).abs() < 1e-12);
        assert!(blade_speed(0.0, 1.0).is_err());
    }
}
