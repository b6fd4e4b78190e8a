mod error;
mod systems;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tc_components::NozzleAero;
use tc_config::{Case, apply};
use tc_sim::{IntegratorType, ScenarioModel, SimOptions, run_scenario};
use tc_solver::{NewtonConfig, NonLinearSolver, Problem};
use tc_system::INTRINSIC;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

#[derive(Parser)]
#[command(name = "tc-cli")]
#[command(about = "TurboCycle CLI - gas turbine component and engine models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List buildable systems and their design methods
    List,
    /// Solve a system
    Run {
        /// Engine label or component, e.g. `turbofan` or `compressor:hpc`
        system: String,
        /// Case file (YAML or JSON) with parameters, method and solver settings
        #[arg(long)]
        config: Option<PathBuf>,
        /// Design method to add to the intrinsic closure
        #[arg(long)]
        method: Option<String>,
        /// Print every value whose path starts with this prefix
        #[arg(long)]
        show: Option<String>,
    },
    /// Nozzle under a falling ambient pressure
    NozzleTransient {
        /// Time step in seconds
        #[arg(long, default_value_t = 0.1)]
        dt: f64,
        /// End time in seconds
        #[arg(long, default_value_t = 10.0)]
        t_end: f64,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Run {
            system,
            config,
            method,
            show,
        } => cmd_run(&system, config.as_deref(), method.as_deref(), show.as_deref()),
        Commands::NozzleTransient { dt, t_end } => cmd_nozzle_transient(dt, t_end),
    }
}

fn cmd_list() -> CliResult<()> {
    for name in systems::names() {
        let system = systems::build(&name)?;
        let methods: Vec<String> = std::iter::once(INTRINSIC.to_string())
            .chain(system.design_methods().into_iter().map(|m| m.name))
            .collect();
        println!("{name:<20} {}", methods.join(", "));
    }
    Ok(())
}

fn cmd_run(name: &str, config: Option<&Path>, method: Option<&str>, show: Option<&str>) -> CliResult<()> {
    let mut system = systems::build(name)?;
    info!(system = name, config = ?config, "building");

    let case = match config {
        Some(path) => Case::load(path)?,
        None => Case::default(),
    };
    apply(system.as_mut(), &case.parameters)?;

    let mut problem = Problem::new(system.as_ref());
    if let Some(method) = method.or(case.method.as_deref()) {
        problem = problem.with_method(system.as_ref(), method)?;
    }
    let solver = NonLinearSolver::new(NewtonConfig {
        max_iterations: case.solver.max_iterations,
        abs_tol: case.solver.abs_tol,
        ..NewtonConfig::default()
    });

    let start = Instant::now();
    let solution = solver.solve(system.as_mut(), &problem)?;
    println!(
        "{}: converged in {} iterations, residual {:.3e} ({:.1} ms)",
        system.name(),
        solution.iterations,
        solution.residual_norm,
        start.elapsed().as_secs_f64() * 1e3
    );
    for (var, value) in &solution.unknowns {
        println!("  {var:<50} {value:>16.6}");
    }

    if let Some(prefix) = show {
        println!();
        for (path, value) in solution.snapshot.with_prefix(prefix) {
            println!("  {path:<50} {value:>16.6}");
        }
    }
    Ok(())
}

fn cmd_nozzle_transient(dt: f64, t_end: f64) -> CliResult<()> {
    let nozzle = NozzleAero::new("nozzle");
    let problem = Problem::new(&nozzle);
    let mut model = ScenarioModel::new(Box::new(nozzle), problem)
        .scenario("pamb", |t| 1.01e5 - 1e4 * t)?
        .record("pamb")
        .record("mach")
        .record("fl_in.w")
        .record("thrust");

    let opts = SimOptions {
        dt,
        t_end,
        integrator: IntegratorType::ForwardEuler,
        ..SimOptions::default()
    };
    let record = run_scenario(&mut model, &opts)?;

    println!("{:>8} {:>12} {:>8} {:>10} {:>12}", "t", "pamb", "mach", "w", "thrust");
    for (i, t) in record.t.iter().enumerate() {
        let value = |path: &str| record.series(path).map_or(f64::NAN, |s| s[i]);
        println!(
            "{t:>8.2} {:>12.1} {:>8.4} {:>10.3} {:>12.1}",
            value("pamb"),
            value("mach"),
            value("fl_in.w"),
            value("thrust")
        );
    }
    Ok(())
}
