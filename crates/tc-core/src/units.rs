// tc-core/src/units.rs

use uom::si::f64::{
    Angle as UomAngle, AngularVelocity as UomAngularVelocity, Area as UomArea, Length as UomLength,
    MassDensity as UomMassDensity, MassRate as UomMassRate, Power as UomPower,
    Pressure as UomPressure, Ratio as UomRatio, TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type AngularVelocity = UomAngularVelocity;
pub type Area = UomArea;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn rpm(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::revolution_per_minute;
    AngularVelocity::new::<revolution_per_minute>(v)
}

#[inline]
pub fn watt(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Shaft speed in rpm to angular velocity in rad/s.
#[inline]
pub fn rpm_to_rad_s(n: f64) -> f64 {
    use uom::si::angular_velocity::radian_per_second;
    rpm(n).get::<radian_per_second>()
}

/// Shaft power in W to mechanical horsepower.
#[inline]
pub fn watt_to_hp(p: f64) -> f64 {
    use uom::si::power::horsepower;
    watt(p).get::<horsepower>()
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

/// Wall slope `dr/dz` of a line inclined by `angle_deg` degrees to the axis.
#[inline]
pub fn slope_from_deg(angle_deg: f64) -> f64 {
    use uom::si::angle::radian;
    deg(angle_deg).get::<radian>().tan()
}

pub mod constants {
    /// ISA sea-level static pressure (Pa)
    pub const P_ISA_SL: f64 = 101_325.0;
    /// ISA sea-level static temperature (K), also the corrected-speed reference
    pub const T_ISA_SL: f64 = 288.15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _mdot = kgps(1.2);
        let _l = m(2.0);
        let _a = m2(0.5);
        let _dt = s(0.1);
    }

    #[test]
    fn rpm_conversion_matches_pi_over_30() {
        let omega = rpm_to_rad_s(3000.0);
        assert!((omega - 3000.0 * std::f64::consts::PI / 30.0).abs() < 1e-9);
    }

    #[test]
    fn slope_of_45_degrees() {
        assert!((slope_from_deg(45.0) - 1.0).abs() < 1e-12);
        assert!((slope_from_deg(-45.0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn horsepower_conversion() {
        let hp = watt_to_hp(745.699_871_582_270_2);
        assert!((hp - 1.0).abs() < 1e-6);
    }
}
