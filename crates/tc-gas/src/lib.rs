//! Thermodynamic property relations for the working gas.
//!
//! Every aero component owns a [`GasLaw`] value. Laws are stateless: the same
//! inputs always give the same outputs, so they can be evaluated any number
//! of times during an iterative solve.

pub mod error;
pub mod ideal;
pub mod law;
pub mod polynomial;

pub use error::{GasError, GasResult};
pub use ideal::IdealDryAir;
pub use law::{DEFAULT_T_TOL, GasLaw, MAX_T_ITERATIONS};
pub use polynomial::PolynomialAir;
