use tc_components::UnknownConfig;
use tc_config::ConfigError;
use tc_engines::UnknownEngine;
use tc_sim::SimError;
use tc_solver::SolverError;
use tc_system::SystemError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("unknown system `{0}` (see `tc-cli list`)")]
    UnknownSystem(String),

    #[error(transparent)]
    Engine(#[from] UnknownEngine),

    #[error(transparent)]
    Preset(#[from] UnknownConfig),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    System(#[from] SystemError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Sim(#[from] SimError),
}
