//! Scenario runs on component models.

use approx::assert_relative_eq;
use tc_components::{Gearbox, NozzleAero};
use tc_sim::{IntegratorType, ScenarioModel, SimError, SimOptions, run_scenario};
use tc_solver::Problem;

#[test]
fn nozzle_chokes_as_ambient_pressure_falls() {
    let nozzle = NozzleAero::new("noz");
    let problem = Problem::new(&nozzle);
    let mut model = ScenarioModel::new(Box::new(nozzle), problem)
        .scenario("pamb", |t| 1.01e5 - 1e4 * t)
        .unwrap()
        .record("mach")
        .record("choked")
        .record("fl_in.w");

    let opts = SimOptions {
        dt: 0.1,
        t_end: 10.0,
        integrator: IntegratorType::ForwardEuler,
        ..SimOptions::default()
    };
    let rec = run_scenario(&mut model, &opts).unwrap();
    assert_eq!(rec.t.len(), 101);
    assert_relative_eq!(*rec.t.last().unwrap(), 10.0, max_relative = 1e-12);

    let mach = rec.series("mach").unwrap();
    assert_relative_eq!(mach[0], 0.70, max_relative = 1e-2);
    assert_eq!(*mach.last().unwrap(), 1.0);
    assert!(mach.windows(2).all(|w| w[1] >= w[0]));

    // Once sonic, the swallowed flow no longer depends on ambient pressure.
    let choked = rec.series("choked").unwrap();
    let w = rec.series("fl_in.w").unwrap();
    let first = choked.iter().position(|c| *c == 1.0).unwrap();
    assert!(first > 0);
    for wi in &w[first..] {
        assert_relative_eq!(*wi, w[first], max_relative = 1e-6);
    }
    assert!(w[0] < w[first]);
}

#[test]
fn uneven_step_still_ends_at_t_end() {
    let nozzle = NozzleAero::new("noz");
    let problem = Problem::new(&nozzle);
    let mut model = ScenarioModel::new(Box::new(nozzle), problem)
        .scenario("pamb", |t| 1.01e5 - 1e4 * t)
        .unwrap()
        .record("pamb")
        .record("mach");

    let opts = SimOptions {
        dt: 0.3,
        t_end: 10.0,
        integrator: IntegratorType::ForwardEuler,
        ..SimOptions::default()
    };
    let rec = run_scenario(&mut model, &opts).unwrap();
    // 33 full steps and one of 0.1 s
    assert_eq!(rec.t.len(), 35);
    assert_relative_eq!(*rec.t.last().unwrap(), 10.0, epsilon = 1e-12);
    assert_relative_eq!(*rec.series("pamb").unwrap().last().unwrap(), 1000.0, epsilon = 1e-6);
    assert_eq!(*rec.series("mach").unwrap().last().unwrap(), 1.0);
}

#[test]
fn gearbox_speed_grows_exponentially() {
    let mut gearbox = Gearbox::new("gb");
    gearbox.inputs.sh_in.n = 100.0;
    gearbox.inputs.speed_ratio = 2.0;
    // dn/dt = n / 2
    let mut model = ScenarioModel::new(Box::new(gearbox), Problem::empty())
        .transient("sh_in.n", "sh_out.n")
        .unwrap()
        .record("sh_out.n");

    let opts = SimOptions {
        dt: 0.01,
        t_end: 1.0,
        record_every: 10,
        ..SimOptions::default()
    };
    let rec = run_scenario(&mut model, &opts).unwrap();
    assert_eq!(rec.t.len(), 11);
    let n_end = rec.x.last().unwrap()[0];
    assert_relative_eq!(n_end, 100.0 * 0.5f64.exp(), max_relative = 1e-8);
    assert_relative_eq!(*rec.series("sh_out.n").unwrap().last().unwrap(), n_end / 2.0, max_relative = 1e-12);
}

#[test]
fn paths_must_be_free_inputs() {
    let nozzle = NozzleAero::new("noz");
    let problem = Problem::new(&nozzle);
    let model = ScenarioModel::new(Box::new(nozzle.clone()), problem.clone());
    assert!(matches!(model.scenario("mach", |_| 1.0), Err(SimError::Scenario { .. })));

    let model = ScenarioModel::new(Box::new(nozzle), problem);
    assert!(matches!(model.transient("thrust", "mach"), Err(SimError::Scenario { .. })));
}

#[test]
fn failed_solve_reports_the_time() {
    let nozzle = NozzleAero::new("noz");
    let problem = Problem::new(&nozzle);
    // Ambient pressure passes the inlet total pressure at t = 4.
    let mut model = ScenarioModel::new(Box::new(nozzle), problem)
        .scenario("pamb", |t| 1.01e5 + 1e4 * t)
        .unwrap();
    let opts = SimOptions {
        dt: 1.0,
        t_end: 10.0,
        integrator: IntegratorType::ForwardEuler,
        ..SimOptions::default()
    };
    match run_scenario(&mut model, &opts) {
        Err(SimError::Solve { t, .. }) => assert!(t >= 4.0, "{t}"),
        other => panic!("expected a solve failure, got {other:?}"),
    }
}
