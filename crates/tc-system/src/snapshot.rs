//! Flat record of every value of a system after one compute.

use crate::error::{SystemError, SystemResult};
use tc_core::{Real, VarMap};

/// Values of all inputs and outputs of a system, keyed by canonical path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    values: VarMap,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, value: Real) {
        self.values.insert(path.into(), value);
    }

    pub fn get(&self, path: &str) -> Option<Real> {
        self.values.get(path).copied()
    }

    /// Value at `path`, or `UnknownVariable` attributed to `system`.
    pub fn value(&self, system: &str, path: &str) -> SystemResult<Real> {
        self.get(path).ok_or_else(|| SystemError::UnknownVariable {
            system: system.to_string(),
            path: path.to_string(),
        })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.contains_key(path)
    }

    /// Insert every entry of `child` under `prefix.`.
    pub fn merge_prefixed(&mut self, prefix: &str, child: Snapshot) {
        for (k, v) in child.values {
            self.values.insert(format!("{prefix}.{k}"), v);
        }
    }

    /// Entries whose path starts with `prefix`.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, Real)> {
        self.values
            .iter()
            .filter(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), *v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Real)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<VarMap> for Snapshot {
    fn from(values: VarMap) -> Self {
        Self { values }
    }
}
