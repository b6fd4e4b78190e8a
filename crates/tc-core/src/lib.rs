//! tc-core: shared foundation for the turbocycle workspace.
//!
//! Contains:
//! - units (uom SI types + constructors, rpm and horsepower conversions)
//! - numeric (Real + tolerances + float helpers)
//! - vars (dotted-path access to scalar fields, the `variables!` macro)
//! - ports (fluid, shaft and keypoint interface records)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod ports;
pub mod units;
pub mod vars;

pub use error::{TcError, TcResult};
pub use numeric::*;
pub use ports::{C1Keypoint, FluidState, Keypoint, KeypointSet, ShaftState};
pub use vars::{VarMap, Variables};
