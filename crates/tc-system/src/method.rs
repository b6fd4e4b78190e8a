//! Design methods: named bags of unknowns, targets and equations.
//!
//! A system always carries an intrinsic method (its own closure equations)
//! and may declare named methods for design and scaling problems. Methods
//! compose: `extend` concatenates, `prefixed` lifts a child's method into its
//! parent's path space.

use crate::error::{SystemError, SystemResult};
use std::fmt;
use std::str::FromStr;
use tc_core::Real;

/// Name of the method every system carries.
pub const INTRINSIC: &str = "intrinsic";

/// A free variable of the problem, clamped to `[lower, upper]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Unknown {
    pub var: String,
    pub lower: Real,
    pub upper: Real,
}

impl Unknown {
    pub fn free(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            lower: Real::NEG_INFINITY,
            upper: Real::INFINITY,
        }
    }

    pub fn clamp(&self, x: Real) -> Real {
        x.max(self.lower).min(self.upper)
    }
}

/// A variable held at a value during the solve.
///
/// Without an explicit value the target is frozen at whatever the system
/// holds when the problem is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub var: String,
    pub value: Option<Real>,
}

/// A residual contributed to the problem.
#[derive(Clone, Debug, PartialEq)]
pub enum Equation {
    /// `var == 0`
    Zero(String),
    /// `var == value`
    Fixed { var: String, value: Real },
    /// `lhs == rhs`
    Balance { lhs: String, rhs: String },
}

impl Equation {
    pub fn zero(var: impl Into<String>) -> Self {
        Equation::Zero(var.into())
    }

    pub fn fixed(var: impl Into<String>, value: Real) -> Self {
        Equation::Fixed {
            var: var.into(),
            value,
        }
    }

    pub fn balance(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Equation::Balance {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Same equation with every variable passed through `f`.
    pub fn map_vars(&self, f: impl Fn(&str) -> String) -> Self {
        match self {
            Equation::Zero(v) => Equation::Zero(f(v)),
            Equation::Fixed { var, value } => Equation::Fixed {
                var: f(var),
                value: *value,
            },
            Equation::Balance { lhs, rhs } => Equation::Balance {
                lhs: f(lhs),
                rhs: f(rhs),
            },
        }
    }

    pub fn vars(&self) -> Vec<&str> {
        match self {
            Equation::Zero(v) | Equation::Fixed { var: v, .. } => vec![v.as_str()],
            Equation::Balance { lhs, rhs } => vec![lhs.as_str(), rhs.as_str()],
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Equation::Zero(v) => write!(f, "{v} == 0"),
            Equation::Fixed { var, value } => write!(f, "{var} == {value}"),
            Equation::Balance { lhs, rhs } => write!(f, "{lhs} == {rhs}"),
        }
    }
}

fn is_path(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|seg| {
            let mut chars = seg.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Parse `"lhs == rhs"` where `lhs` is a path and `rhs` a path or a number.
impl FromStr for Equation {
    type Err = SystemError;

    fn from_str(text: &str) -> SystemResult<Self> {
        let err = |what| SystemError::Equation {
            text: text.to_string(),
            what,
        };
        let (lhs, rhs) = text.split_once("==").ok_or_else(|| err("missing `==`"))?;
        let (lhs, rhs) = (lhs.trim(), rhs.trim());
        if !is_path(lhs) {
            return Err(err("left side must be a variable path"));
        }
        if let Ok(value) = rhs.parse::<Real>() {
            if !value.is_finite() {
                return Err(err("right side is not finite"));
            }
            return Ok(if value == 0.0 {
                Equation::zero(lhs)
            } else {
                Equation::fixed(lhs, value)
            });
        }
        if !is_path(rhs) {
            return Err(err("right side must be a number or a variable path"));
        }
        Ok(Equation::balance(lhs, rhs))
    }
}

/// Named collection of unknowns, targets and equations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DesignMethod {
    pub name: String,
    pub unknowns: Vec<Unknown>,
    pub targets: Vec<Target>,
    pub equations: Vec<Equation>,
}

impl DesignMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn unknown(mut self, var: impl Into<String>) -> Self {
        self.unknowns.push(Unknown::free(var));
        self
    }

    pub fn bounded_unknown(mut self, var: impl Into<String>, lower: Real, upper: Real) -> Self {
        self.unknowns.push(Unknown {
            var: var.into(),
            lower,
            upper,
        });
        self
    }

    /// Hold `var` at its value when the problem is built.
    pub fn target(mut self, var: impl Into<String>) -> Self {
        self.targets.push(Target {
            var: var.into(),
            value: None,
        });
        self
    }

    pub fn target_value(mut self, var: impl Into<String>, value: Real) -> Self {
        self.targets.push(Target {
            var: var.into(),
            value: Some(value),
        });
        self
    }

    pub fn equation(mut self, equation: Equation) -> Self {
        self.equations.push(equation);
        self
    }

    /// Parse and add an equation written as `"lhs == rhs"`.
    pub fn equation_str(self, text: &str) -> SystemResult<Self> {
        Ok(self.equation(text.parse()?))
    }

    /// Append everything `other` declares. Unknowns already present are
    /// not repeated.
    pub fn extend(mut self, other: &DesignMethod) -> Self {
        for u in &other.unknowns {
            if !self.unknowns.iter().any(|x| x.var == u.var) {
                self.unknowns.push(u.clone());
            }
        }
        self.targets.extend(other.targets.iter().cloned());
        self.equations.extend(other.equations.iter().cloned());
        self
    }

    /// Copy with every path lifted under `prefix.`.
    pub fn prefixed(&self, prefix: &str) -> Self {
        self.map_vars(|v| format!("{prefix}.{v}"))
    }

    /// Copy with every path passed through `f`.
    pub fn map_vars(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            name: self.name.clone(),
            unknowns: self
                .unknowns
                .iter()
                .map(|u| Unknown {
                    var: f(&u.var),
                    ..u.clone()
                })
                .collect(),
            targets: self
                .targets
                .iter()
                .map(|t| Target {
                    var: f(&t.var),
                    value: t.value,
                })
                .collect(),
            equations: self.equations.iter().map(|e| e.map_vars(&f)).collect(),
        }
    }

    pub fn without_unknown(mut self, var: &str) -> Self {
        self.unknowns.retain(|u| u.var != var);
        self
    }

    /// Number of residuals the method contributes.
    pub fn n_equations(&self) -> usize {
        self.targets.len() + self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unknowns.is_empty() && self.targets.is_empty() && self.equations.is_empty()
    }
}
