//! Convergent nozzle with a choked branch.

use crate::common::{check_finite, check_positive};
use crate::error::ComponentResult;
use tc_core::{FluidState, Real, variables};
use tc_gas::{GasLaw, IdealDryAir};
use tc_system::{Component, DesignMethod, Equation, INTRINSIC, SystemResult};

/// Exit-plane flow state of a convergent nozzle.
///
/// The transition is decided on every compute from the ideal Mach number
/// of a full expansion to ambient: `ideal_mach >= 1` is sonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowRegime {
    /// Fully expanded to ambient; exit Mach equals the ideal Mach.
    Subsonic,
    /// Exit Mach is one; exit static pressure follows the sonic relation.
    Sonic,
}

impl FlowRegime {
    pub fn from_ideal_mach(ideal_mach: Real) -> Self {
        if ideal_mach >= 1.0 {
            FlowRegime::Sonic
        } else {
            FlowRegime::Subsonic
        }
    }

    pub fn is_choked(self) -> bool {
        self == FlowRegime::Sonic
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NozzleAeroInputs {
    pub fl_in: FluidState,
    /// Ambient static pressure (Pa)
    pub pamb: Real,
    /// Exit area (m²)
    pub area: Real,
}

impl Default for NozzleAeroInputs {
    fn default() -> Self {
        Self {
            fl_in: FluidState::new(1.405e5, 530.0, 30.0),
            pamb: 1.01e5,
            area: 0.133,
        }
    }
}

variables!(NozzleAeroInputs { pamb, area } nested { fl_in });

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NozzleAeroOutputs {
    pub fl_out: FluidState,
    pub ideal_mach: Real,
    pub mach: Real,
    /// Exit static pressure (Pa)
    pub ps: Real,
    /// Exit static temperature (K)
    pub ts: Real,
    /// Exit speed (m/s)
    pub speed: Real,
    /// Gross thrust (N)
    pub thrust: Real,
    /// Flow area needed by the mass flow, relative to `area`, minus one
    pub eps_area: Real,
    /// 1 when choked, 0 otherwise
    pub choked: Real,
}

variables!(NozzleAeroOutputs {
    ideal_mach, mach, ps, ts, speed, thrust, eps_area, choked
} nested { fl_out });

#[derive(Clone, Debug)]
pub struct NozzleAero<G: GasLaw = IdealDryAir> {
    name: String,
    gas: G,
    pub inputs: NozzleAeroInputs,
}

impl NozzleAero<IdealDryAir> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_gas(name, IdealDryAir::default())
    }
}

impl<G: GasLaw> NozzleAero<G> {
    pub fn with_gas(name: impl Into<String>, gas: G) -> Self {
        Self {
            name: name.into(),
            gas,
            inputs: NozzleAeroInputs::default(),
        }
    }

    pub fn regime(&self) -> ComponentResult<FlowRegime> {
        let fl = &self.inputs.fl_in;
        let ideal = self
            .gas
            .mach_from_pressure_ratio(fl.pt, self.inputs.pamb, fl.tt)?;
        Ok(FlowRegime::from_ideal_mach(ideal))
    }

    pub fn run(&self) -> ComponentResult<NozzleAeroOutputs> {
        let i = &self.inputs;
        let fl = i.fl_in;
        let w = check_positive(fl.w, "mass flow")?;
        let pamb = check_positive(i.pamb, "ambient pressure")?;
        let area = check_positive(i.area, "exit area")?;

        let ideal_mach = self.gas.mach_from_pressure_ratio(fl.pt, pamb, fl.tt)?;
        let regime = FlowRegime::from_ideal_mach(ideal_mach);
        let (mach, ps) = match regime {
            FlowRegime::Subsonic => (ideal_mach, pamb),
            FlowRegime::Sonic => (1.0, self.gas.static_pressure(fl.pt, fl.tt, 1.0)?),
        };

        let ts = self.gas.static_temperature(fl.tt, mach)?;
        let speed = check_positive(mach * self.gas.speed_of_sound(ts)?, "exit speed")?;
        let rho = self.gas.density(ps, ts)?;
        let flow_area = w / (rho * speed);

        Ok(NozzleAeroOutputs {
            fl_out: fl,
            ideal_mach,
            mach,
            ps,
            ts,
            speed,
            thrust: check_finite(w * speed + (ps - pamb) * area, "thrust")?,
            eps_area: check_finite(flow_area / area - 1.0, "eps_area")?,
            choked: if regime.is_choked() { 1.0 } else { 0.0 },
        })
    }
}

impl<G: GasLaw + 'static> Component for NozzleAero<G> {
    type Inputs = NozzleAeroInputs;
    type Outputs = NozzleAeroOutputs;

    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &NozzleAeroInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut NozzleAeroInputs {
        &mut self.inputs
    }

    fn evaluate(&self) -> SystemResult<NozzleAeroOutputs> {
        self.run().map_err(|e| e.in_system(&self.name))
    }

    /// The nozzle swallows the flow that fits its exit area.
    fn intrinsic(&self) -> DesignMethod {
        DesignMethod::new(INTRINSIC)
            .unknown("fl_in.w")
            .equation(Equation::zero("eps_area"))
    }
}
