//! Nonlinear solver for design problems posed on a [`System`](tc_system::System).
//!
//! A [`Problem`] gathers unknowns, targets and equations (starting from the
//! system's intrinsic method), resolves them against the system and hands a
//! residual function to a damped Newton iteration with a finite-difference
//! Jacobian.

pub mod error;
pub mod jacobian;
pub mod newton;
pub mod problem;
pub mod solve;

pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonResult};
pub use problem::{BuiltProblem, Problem};
pub use solve::{NonLinearSolver, Solution, solve};
