//! Time scenarios on a solved system.

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use crate::sim::{SimOptions, run_sim};
use tc_core::Real;
use tc_solver::{NonLinearSolver, Problem};
use tc_system::{Snapshot, System};
use tracing::debug;

/// Boundary value as a function of time.
pub type ScenarioFn = Box<dyn Fn(f64) -> Real + Send + Sync>;

#[derive(Clone, Debug)]
struct Transient {
    state: String,
    rate: String,
}

/// A system re-solved at every evaluation.
///
/// At time `t` each scenario variable is set to its function of `t`, each
/// transient state is set from the integrator state, and the problem is
/// solved starting from the previous solution. The state derivative is
/// read from the declared rate variables.
///
/// With no transients the state is empty and the model simply marches the
/// scenario through time.
pub struct ScenarioModel {
    system: Box<dyn System>,
    problem: Problem,
    solver: NonLinearSolver,
    scenario: Vec<(String, ScenarioFn)>,
    transients: Vec<Transient>,
    x0: Vec<Real>,
    record: Vec<String>,
}

impl ScenarioModel {
    pub fn new(system: Box<dyn System>, problem: Problem) -> Self {
        Self {
            system,
            problem,
            solver: NonLinearSolver::default(),
            scenario: Vec::new(),
            transients: Vec::new(),
            x0: Vec::new(),
            record: Vec::new(),
        }
    }

    pub fn with_solver(mut self, solver: NonLinearSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Drive the free input `var` with `f(t)`.
    pub fn scenario(mut self, var: &str, f: impl Fn(f64) -> Real + Send + Sync + 'static) -> SimResult<Self> {
        self.free_input(var)?;
        self.scenario.push((var.to_string(), Box::new(f)));
        Ok(self)
    }

    /// Integrate the free input `state` with derivative `rate`, starting
    /// from its current value.
    pub fn transient(mut self, state: &str, rate: &str) -> SimResult<Self> {
        let x0 = self.free_input(state)?;
        self.transients.push(Transient {
            state: state.to_string(),
            rate: self.system.resolve(rate),
        });
        self.x0.push(x0);
        Ok(self)
    }

    /// Keep `path` in the [`ScenarioRecord`].
    pub fn record(mut self, path: &str) -> Self {
        self.record.push(path.to_string());
        self
    }

    pub fn system(&self) -> &dyn System {
        self.system.as_ref()
    }

    fn free_input(&self, var: &str) -> SimResult<Real> {
        self.system.read_input(var).ok_or_else(|| SimError::Scenario {
            what: format!("`{var}` is not a free input of `{}`", self.system.name()),
        })
    }

    /// Solve the system at `(t, x)` and return its snapshot.
    pub fn observe(&mut self, t: f64, x: &[Real]) -> SimResult<Snapshot> {
        for (var, f) in &self.scenario {
            self.system.set(var, f(t))?;
        }
        for (tr, v) in self.transients.iter().zip(x) {
            self.system.set(&tr.state, *v)?;
        }
        let solution = self
            .solver
            .solve(self.system.as_mut(), &self.problem)
            .map_err(|source| SimError::Solve { t, source })?;
        debug!(t, iterations = solution.iterations, "scenario solved");
        Ok(solution.snapshot)
    }
}

impl TransientModel for ScenarioModel {
    type State = Vec<Real>;

    fn initial_state(&self) -> Vec<Real> {
        self.x0.clone()
    }

    fn rhs(&mut self, t: f64, x: &Vec<Real>) -> SimResult<Vec<Real>> {
        let snap = self.observe(t, x)?;
        self.transients
            .iter()
            .map(|tr| {
                snap.get(&tr.rate).ok_or_else(|| SimError::Scenario {
                    what: format!("no rate variable `{}`", tr.rate),
                })
            })
            .collect()
    }
}

/// Recorded times, states and selected outputs of a scenario run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioRecord {
    pub t: Vec<f64>,
    pub x: Vec<Vec<Real>>,
    /// One series per recorded path, aligned with `t`
    pub outputs: Vec<(String, Vec<Real>)>,
}

impl ScenarioRecord {
    pub fn series(&self, path: &str) -> Option<&[Real]> {
        self.outputs
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, v)| v.as_slice())
    }
}

/// Run `model` and solve it again at every recorded time to collect its
/// recorded outputs.
pub fn run_scenario(model: &mut ScenarioModel, opts: &SimOptions) -> SimResult<ScenarioRecord> {
    let sim = run_sim(model, opts)?;
    let mut outputs: Vec<(String, Vec<Real>)> = model
        .record
        .iter()
        .map(|p| (p.clone(), Vec::with_capacity(sim.t.len())))
        .collect();

    for (t, x) in sim.t.iter().zip(&sim.x) {
        let snap = model.observe(*t, x)?;
        for (path, series) in &mut outputs {
            let canonical = model.system.resolve(path);
            let value = snap.get(&canonical).ok_or_else(|| SimError::Scenario {
                what: format!("no recorded variable `{path}`"),
            })?;
            series.push(value);
        }
    }

    Ok(ScenarioRecord {
        t: sim.t,
        x: sim.x,
        outputs,
    })
}
