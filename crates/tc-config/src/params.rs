//! Flattened parameter tables.

use crate::error::{ConfigError, ConfigResult};
use crate::{Format, parse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tc_core::{Real, vars::join};
use tc_system::System;
use tracing::debug;

/// Dotted path to value, in path order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, Real>,
}

/// Raw nested table as read from disk.
pub(crate) type RawTable = BTreeMap<String, Node>;

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Node {
    Value(Real),
    Table(BTreeMap<String, Node>),
    Other(serde_yaml::Value),
}

fn flatten(prefix: &str, node: Node, out: &mut BTreeMap<String, Real>) -> ConfigResult<()> {
    match node {
        Node::Value(v) => {
            out.insert(prefix.to_string(), v);
        }
        Node::Table(table) => {
            for (key, child) in table {
                flatten(&join(prefix, &key), child, out)?;
            }
        }
        Node::Other(found) => {
            return Err(ConfigError::NotANumber {
                path: prefix.to_string(),
                found: format!("{found:?}"),
            });
        }
    }
    Ok(())
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_raw(raw: RawTable) -> ConfigResult<Self> {
        let mut values = BTreeMap::new();
        for (key, node) in raw {
            flatten(&key, node, &mut values)?;
        }
        Ok(Self { values })
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Self::from_raw(parse(content, Format::Json)?)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        Self::from_raw(parse(content, Format::Yaml)?)
    }

    pub fn load_json(path: &Path) -> ConfigResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn load_yaml(path: &Path) -> ConfigResult<Self> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    /// Load JSON or YAML depending on the file extension.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        match Format::from_path(path)? {
            Format::Json => Self::load_json(path),
            Format::Yaml => Self::load_yaml(path),
        }
    }

    pub fn insert(&mut self, path: impl Into<String>, value: Real) {
        self.values.insert(path.into(), value);
    }

    pub fn get(&self, path: &str) -> Option<Real> {
        self.values.get(path).copied()
    }

    /// Entries of `other` override entries of `self`.
    pub fn merge(&mut self, other: &ParameterSet) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), *v);
        }
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

/// Write every parameter into `system`.
pub fn apply(system: &mut dyn System, params: &ParameterSet) -> ConfigResult<()> {
    for (path, value) in params.iter() {
        debug!(system = system.name(), path, value, "set parameter");
        system.set(path, value)?;
    }
    Ok(())
}
