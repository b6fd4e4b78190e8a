//! Problem assembly: from design methods to a residual function.

use crate::error::{SolverError, SolverResult};
use nalgebra::DVector;
use tc_core::{Real, reference_scale};
use tc_system::{DesignMethod, Equation, Snapshot, System, Unknown};

/// Unknowns and equations to be solved on a system.
///
/// Starts from the system's intrinsic method; named methods and extra
/// terms are appended with the builder methods. Paths may use aliases and
/// are resolved against the system when the problem is built.
#[derive(Clone, Debug, Default)]
pub struct Problem {
    method: DesignMethod,
}

impl Problem {
    /// The system's intrinsic method.
    pub fn new(system: &dyn System) -> Self {
        Self {
            method: system.intrinsic(),
        }
    }

    /// No terms at all, not even the intrinsic ones.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append the system's design method `name`.
    pub fn with_method(self, system: &dyn System, name: &str) -> SolverResult<Self> {
        let method = system.design_method(name)?;
        Ok(self.extend(&method))
    }

    pub fn extend(mut self, method: &DesignMethod) -> Self {
        self.method = self.method.extend(method);
        self
    }

    pub fn unknown(mut self, var: &str) -> Self {
        self.method = self.method.unknown(var);
        self
    }

    pub fn bounded_unknown(mut self, var: &str, lower: Real, upper: Real) -> Self {
        self.method = self.method.bounded_unknown(var, lower, upper);
        self
    }

    pub fn target(mut self, var: &str) -> Self {
        self.method = self.method.target(var);
        self
    }

    pub fn target_value(mut self, var: &str, value: Real) -> Self {
        self.method = self.method.target_value(var, value);
        self
    }

    pub fn equation(mut self, equation: Equation) -> Self {
        self.method = self.method.equation(equation);
        self
    }

    /// Parse and add `"lhs == rhs"`.
    pub fn equation_str(self, text: &str) -> SolverResult<Self> {
        let equation = text.parse::<Equation>()?;
        Ok(self.equation(equation))
    }

    pub fn method(&self) -> &DesignMethod {
        &self.method
    }

    /// Resolve every path against `system`, freeze targets at the current
    /// values and check the problem is square.
    ///
    /// An unknown or a target that resolves to the same variable as an
    /// earlier one is a structural error.
    pub fn build(&self, system: &dyn System) -> SolverResult<BuiltProblem> {
        let structural = |what: String| SolverError::Structural { what };

        let mut unknowns: Vec<Unknown> = Vec::new();
        for u in &self.method.unknowns {
            let var = system.resolve(&u.var);
            if unknowns.iter().any(|x| x.var == var) {
                return Err(structural(format!("unknown `{var}` is duplicated")));
            }
            if system.read_input(&var).is_none() {
                return Err(structural(format!("unknown `{var}` is not a free input")));
            }
            if u.lower > u.upper {
                return Err(structural(format!("unknown `{var}` has an empty range")));
            }
            unknowns.push(Unknown { var, ..u.clone() });
        }

        let n_equations = self.method.n_equations();
        if unknowns.len() != n_equations {
            return Err(structural(format!(
                "{} unknowns for {} equations",
                unknowns.len(),
                n_equations
            )));
        }

        let snap = system.compute()?;
        let lookup = |var: &str| -> SolverResult<(String, Real)> {
            let var = system.resolve(var);
            match snap.get(&var) {
                Some(v) => Ok((var, v)),
                None => Err(structural(format!("no variable `{var}`"))),
            }
        };

        let mut residuals = Vec::with_capacity(n_equations);
        for t in &self.method.targets {
            let (var, current) = lookup(&t.var)?;
            if residuals
                .iter()
                .any(|r| matches!(r, Residual::Fixed { var: v, .. } if *v == var))
            {
                return Err(structural(format!("target `{var}` is duplicated")));
            }
            let value = t.value.unwrap_or(current);
            residuals.push(Residual::Fixed {
                var,
                value,
                scale: reference_scale(value),
            });
        }
        for e in &self.method.equations {
            residuals.push(match e {
                Equation::Zero(v) => Residual::Zero { var: lookup(v)?.0 },
                Equation::Fixed { var, value } => Residual::Fixed {
                    var: lookup(var)?.0,
                    value: *value,
                    scale: reference_scale(*value),
                },
                Equation::Balance { lhs, rhs } => {
                    let (rhs, rhs0) = lookup(rhs)?;
                    Residual::Balance {
                        lhs: lookup(lhs)?.0,
                        rhs,
                        scale: reference_scale(rhs0),
                    }
                }
            });
        }

        Ok(BuiltProblem {
            system: system.name().to_string(),
            unknowns,
            residuals,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Residual {
    Zero { var: String },
    Fixed { var: String, value: Real, scale: Real },
    Balance { lhs: String, rhs: String, scale: Real },
}

/// A square problem with canonical paths and frozen reference values.
#[derive(Clone, Debug)]
pub struct BuiltProblem {
    system: String,
    unknowns: Vec<Unknown>,
    residuals: Vec<Residual>,
}

impl BuiltProblem {
    pub fn unknowns(&self) -> &[Unknown] {
        &self.unknowns
    }

    pub fn len(&self) -> usize {
        self.unknowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unknowns.is_empty()
    }

    pub fn bounds(&self) -> Vec<(Real, Real)> {
        self.unknowns.iter().map(|u| (u.lower, u.upper)).collect()
    }

    /// Scaled residuals at `snap`.
    ///
    /// Targets and fixed equations are relative to `max(|value|, 1)`;
    /// balances to `max(|rhs|, 1)` taken when the problem was built.
    pub fn residuals(&self, snap: &Snapshot) -> SolverResult<DVector<f64>> {
        let mut out = DVector::zeros(self.residuals.len());
        for (i, r) in self.residuals.iter().enumerate() {
            out[i] = match r {
                Residual::Zero { var } => snap.value(&self.system, var)?,
                Residual::Fixed { var, value, scale } => {
                    (snap.value(&self.system, var)? - value) / scale
                }
                Residual::Balance { lhs, rhs, scale } => {
                    (snap.value(&self.system, lhs)? - snap.value(&self.system, rhs)?) / scale
                }
            };
        }
        Ok(out)
    }

    /// Human-readable form of each residual, in order.
    pub fn labels(&self) -> Vec<String> {
        self.residuals
            .iter()
            .map(|r| match r {
                Residual::Zero { var } => format!("{var} == 0"),
                Residual::Fixed { var, value, .. } => format!("{var} == {value}"),
                Residual::Balance { lhs, rhs, .. } => format!("{lhs} == {rhs}"),
            })
            .collect()
    }
}
