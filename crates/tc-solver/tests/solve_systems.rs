//! Solving small assemblies of incompressible orifices.

use approx::assert_relative_eq;
use proptest::prelude::*;
use tc_core::{FluidState, Real, variables};
use tc_solver::{NonLinearSolver, Problem, Solution, SolverError, SolverResult, solve};
use tc_system::{Assembly, Component, DesignMethod, Equation, System, SystemError, SystemResult};

#[derive(Clone, Debug)]
struct OrificeIn {
    fl_in: FluidState,
    pamb: Real,
    area: Real,
    cd: Real,
    rho: Real,
}
variables!(OrificeIn { pamb, area, cd, rho } nested { fl_in });

#[derive(Clone, Debug, Default)]
struct OrificeOut {
    fl_out: FluidState,
    w_calc: Real,
    eps: Real,
}
variables!(OrificeOut { w_calc, eps } nested { fl_out });

#[derive(Clone)]
struct Orifice {
    name: String,
    inputs: OrificeIn,
}

impl Orifice {
    fn new(name: &str, pt: Real, area: Real) -> Self {
        Self {
            name: name.to_string(),
            inputs: OrificeIn {
                fl_in: FluidState::new(pt, 300.0, 1.0),
                pamb: 101_325.0,
                area,
                cd: 0.6,
                rho: 1.2,
            },
        }
    }
}

impl Component for Orifice {
    type Inputs = OrificeIn;
    type Outputs = OrificeOut;

    fn name(&self) -> &str {
        &self.name
    }
    fn inputs(&self) -> &OrificeIn {
        &self.inputs
    }
    fn inputs_mut(&mut self) -> &mut OrificeIn {
        &mut self.inputs
    }
    fn evaluate(&self) -> SystemResult<OrificeOut> {
        let i = &self.inputs;
        if i.fl_in.pt <= i.pamb || i.pamb <= 0.0 || i.fl_in.w <= 0.0 {
            return Err(SystemError::Domain {
                system: self.name.clone(),
                what: "orifice needs pt > pamb > 0 and positive flow".into(),
            });
        }
        let w_calc = i.cd * i.area * (2.0 * i.rho * (i.fl_in.pt - i.pamb)).sqrt();
        Ok(OrificeOut {
            fl_out: FluidState::new(i.pamb, i.fl_in.tt, i.fl_in.w),
            w_calc,
            eps: w_calc / i.fl_in.w - 1.0,
        })
    }
    fn intrinsic(&self) -> DesignMethod {
        DesignMethod::new("intrinsic")
            .unknown("fl_in.w")
            .equation(Equation::zero("eps"))
    }
    fn design_methods(&self) -> Vec<DesignMethod> {
        vec![DesignMethod::new("sizing").unknown("area").target("fl_in.w")]
    }
}

fn analytic_flow(pt: Real, pamb: Real, area: Real) -> Real {
    0.6 * area * (2.0 * 1.2 * (pt - pamb)).sqrt()
}

#[test]
fn intrinsic_problem_finds_the_flow() {
    let mut o = Orifice::new("o", 2.0e5, 0.1);
    let problem = Problem::new(&o);
    let sol = solve(&mut o, &problem).unwrap();

    let expected = analytic_flow(2.0e5, 101_325.0, 0.1);
    assert_relative_eq!(sol.value("fl_in.w").unwrap(), expected, max_relative = 1e-7);
    assert_eq!(sol.unknowns[0].0, "fl_in.w");
    assert!(sol.residual_norm < 1e-8);
    // converged value stays in the system
    assert_relative_eq!(o.get("fl_in.w").unwrap(), expected, max_relative = 1e-7);
}

#[test]
fn sizing_method_freezes_the_target() {
    let mut o = Orifice::new("o", 2.0e5, 0.1);
    o.set("fl_in.w", 50.0).unwrap();
    let problem = Problem::new(&o).with_method(&o, "sizing").unwrap();
    let sol = solve(&mut o, &problem).unwrap();

    assert_relative_eq!(sol.value("fl_in.w").unwrap(), 50.0, max_relative = 1e-7);
    let area = sol.value("area").unwrap();
    assert_relative_eq!(analytic_flow(2.0e5, 101_325.0, area), 50.0, max_relative = 1e-7);
}

#[test]
fn parsed_equations_drive_the_solve() {
    let mut o = Orifice::new("o", 2.0e5, 0.1);
    let problem = Problem::new(&o)
        .unknown("fl_in.pt")
        .equation_str("w_calc == 40.0")
        .unwrap();
    let sol = solve(&mut o, &problem).unwrap();
    assert_relative_eq!(sol.value("w_calc").unwrap(), 40.0, max_relative = 1e-7);
    assert_relative_eq!(sol.value("fl_in.w").unwrap(), 40.0, max_relative = 1e-7);
}

#[test]
fn structural_errors() {
    let mut o = Orifice::new("o", 2.0e5, 0.1);

    let extra = Problem::new(&o).unknown("area");
    assert!(matches!(
        solve(&mut o, &extra),
        Err(SolverError::Structural { .. })
    ));

    let output_unknown = Problem::empty()
        .unknown("w_calc")
        .equation(Equation::zero("eps"));
    assert!(matches!(
        solve(&mut o, &output_unknown),
        Err(SolverError::Structural { .. })
    ));

    let missing = Problem::new(&o).unknown("area").target("nope");
    assert!(matches!(
        solve(&mut o, &missing),
        Err(SolverError::Structural { .. })
    ));

    assert!(matches!(
        Problem::new(&o).with_method(&o, "nope"),
        Err(SolverError::System(SystemError::UnknownDesignMethod { .. }))
    ));
}

#[test]
fn duplicated_terms_are_structural() {
    let mut o = Orifice::new("o", 2.0e5, 0.1);
    let duplicated = |r: SolverResult<Solution>, what: &str| match r {
        Err(SolverError::Structural { what: msg }) => assert!(msg.contains(what), "{msg}"),
        other => panic!("expected a structural error, got {other:?}"),
    };

    // fl_in.w is already freed by the intrinsic method
    let unknown_twice = Problem::new(&o)
        .unknown("fl_in.w")
        .target_value("w_calc", 40.0);
    duplicated(solve(&mut o, &unknown_twice), "unknown `fl_in.w` is duplicated");

    let target_twice = Problem::new(&o)
        .unknown("area")
        .unknown("pamb")
        .target("w_calc")
        .target("w_calc");
    duplicated(solve(&mut o, &target_twice), "target `w_calc` is duplicated");
    assert_eq!(o.get("area").unwrap(), 0.1);
}

#[test]
fn empty_problem_just_computes() {
    let mut o = Orifice::new("o", 2.0e5, 0.1);
    let sol = solve(&mut o, &Problem::empty()).unwrap();
    assert_eq!(sol.iterations, 0);
    assert!(sol.snapshot.get("w_calc").is_some());
}

#[test]
fn failed_solve_restores_the_start() {
    let mut o = Orifice::new("o", 2.0e5, 0.1);
    let problem = Problem::new(&o).unknown("pamb").target_value("w_calc", 1.0e9);
    let solver = NonLinearSolver::default();
    assert!(solver.solve(&mut o, &problem).is_err());
    assert_eq!(o.get("pamb").unwrap(), 101_325.0);
    assert_eq!(o.get("fl_in.w").unwrap(), 1.0);
}

fn series() -> Assembly {
    let mut asm = Assembly::new("series");
    let mut first = Orifice::new("first", 3.0e5, 0.05);
    first.inputs.pamb = 2.0e5;
    asm.add_child(first).unwrap();
    asm.add_child(Orifice::new("second", 2.0e5, 0.05)).unwrap();
    asm.connect_port("first.fl_out", "second.fl_in", &["pt", "tt", "w"])
        .unwrap();
    asm.pull("fl_in", "first.fl_in").unwrap();
    asm.extend_intrinsic(&DesignMethod::new("mid").unknown("first.pamb"));
    asm
}

#[test]
fn series_orifices_share_the_drop() {
    let mut asm = series();
    let problem = Problem::new(&asm);
    assert_eq!(problem.build(&asm).unwrap().len(), 2);

    let sol = solve(&mut asm, &problem).unwrap();
    let p_mid = sol.value("first.pamb").unwrap();
    assert_relative_eq!(p_mid, 0.5 * (3.0e5 + 101_325.0), max_relative = 1e-7);
    assert_relative_eq!(
        sol.value("second.w_calc").unwrap(),
        sol.value("first.w_calc").unwrap(),
        max_relative = 1e-7
    );
}

#[test]
fn balance_equation_between_children() {
    let mut asm = Assembly::new("parallel");
    asm.add_child(Orifice::new("a", 2.0e5, 0.1)).unwrap();
    asm.add_child(Orifice::new("b", 2.0e5, 0.05)).unwrap();
    let problem = Problem::new(&asm)
        .unknown("b.area")
        .equation_str("b.fl_in.w == a.fl_in.w")
        .unwrap();
    let sol = solve(&mut asm, &problem).unwrap();
    assert_relative_eq!(sol.value("b.area").unwrap(), 0.1, max_relative = 1e-7);
}

#[test]
fn aliases_resolve_in_problems() {
    let mut asm = series();
    let problem = Problem::new(&asm).target_value("fl_in.w", 20.0).unknown("fl_in.pt");
    let sol = solve(&mut asm, &problem).unwrap();
    assert_eq!(sol.unknowns[2].0, "first.fl_in.pt");
    assert_relative_eq!(sol.value("second.fl_in.w").unwrap(), 20.0, max_relative = 1e-7);
}

proptest! {
    #[test]
    fn intrinsic_flow_matches_closed_form(pt in 1.1e5..5.0e5f64, area in 0.01..0.5f64) {
        let mut o = Orifice::new("o", pt, area);
        let problem = Problem::new(&o);
        let sol = solve(&mut o, &problem).unwrap();
        let expected = analytic_flow(pt, 101_325.0, area);
        prop_assert!((sol.value("fl_in.w").unwrap() - expected).abs() <= 1e-6 * expected);
    }
}
