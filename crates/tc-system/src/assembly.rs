//! Assemblies: ordered children wired by per-variable connections.
//!
//! Children are computed in insertion order. A connection copies one value
//! of the partial snapshot into an input of a later child before that child
//! computes, so an assembly is always a single forward pass; closure between
//! children (shaft balances, matching flows) is left to the solver through
//! the assembly's design methods.
//!
//! Paths inside an assembly are `child.path`. A pull declares an alias at the
//! assembly level (`fl_in` for `compressor.aero.fl_in`), and
//! [`System::resolve`] rewrites aliases to canonical paths recursively.

use crate::error::{SystemError, SystemResult};
use crate::method::{DesignMethod, INTRINSIC};
use crate::snapshot::Snapshot;
use crate::system::System;
use tc_core::Real;

/// Assembly-level outputs derived from the children's merged snapshot.
pub type Outwards = fn(&Snapshot) -> SystemResult<Vec<(String, Real)>>;

#[derive(Clone)]
struct Child {
    name: String,
    system: Box<dyn System>,
}

#[derive(Clone, Debug, PartialEq)]
struct Connection {
    from: String,
    child: usize,
    to: String,
}

#[derive(Clone, Debug, PartialEq)]
struct Pull {
    alias: String,
    target: String,
}

#[derive(Clone)]
pub struct Assembly {
    name: String,
    children: Vec<Child>,
    connections: Vec<Connection>,
    pulls: Vec<Pull>,
    intrinsic: DesignMethod,
    methods: Vec<DesignMethod>,
    outwards: Option<Outwards>,
}

/// Remainder of `path` after `alias` (empty or starting with `.`).
fn alias_rest<'a>(path: &'a str, alias: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(alias)?;
    (rest.is_empty() || rest.starts_with('.')).then_some(rest)
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            connections: Vec::new(),
            pulls: Vec::new(),
            intrinsic: DesignMethod::new(INTRINSIC),
            methods: Vec::new(),
            outwards: None,
        }
    }

    fn connection_error(&self, what: String) -> SystemError {
        SystemError::Connection {
            system: self.name.clone(),
            what,
        }
    }

    fn index_of(&self, child: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name == child)
    }

    /// Append a child. Children compute in the order they are added.
    pub fn add_child(&mut self, system: impl System + 'static) -> SystemResult<()> {
        self.add_boxed(Box::new(system))
    }

    pub fn add_boxed(&mut self, system: Box<dyn System>) -> SystemResult<()> {
        let name = system.name().to_string();
        if name.is_empty() || name.contains('.') {
            return Err(self.connection_error(format!("invalid child name `{name}`")));
        }
        if self.index_of(&name).is_some() {
            return Err(self.connection_error(format!("duplicate child `{name}`")));
        }
        self.children.push(Child { name, system });
        Ok(())
    }

    pub fn child(&self, name: &str) -> SystemResult<&dyn System> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.system.as_ref())
            .ok_or_else(|| SystemError::UnknownVariable {
                system: self.name.clone(),
                path: name.to_string(),
            })
    }

    pub fn child_mut(&mut self, name: &str) -> SystemResult<&mut dyn System> {
        let system = self.name.clone();
        self.children
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| c.system.as_mut() as &mut dyn System)
            .ok_or_else(|| SystemError::UnknownVariable {
                system,
                path: name.to_string(),
            })
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.name.as_str())
    }

    /// Drive input `to` from the value at `from` on every compute.
    ///
    /// Both sides are `child.path` (aliases allowed). The source child must
    /// come before the target child, and the target must be a free input.
    pub fn connect(&mut self, from: &str, to: &str) -> SystemResult<()> {
        let from = self.resolve(from);
        let to = self.resolve(to);
        let (from_head, _) = from
            .split_once('.')
            .ok_or_else(|| self.connection_error(format!("`{from}` is not a child path")))?;
        let (to_head, to_rest) = to
            .split_once('.')
            .ok_or_else(|| self.connection_error(format!("`{to}` is not a child path")))?;
        let src = self
            .index_of(from_head)
            .ok_or_else(|| self.connection_error(format!("no child `{from_head}`")))?;
        let dst = self
            .index_of(to_head)
            .ok_or_else(|| self.connection_error(format!("no child `{to_head}`")))?;
        if src >= dst {
            return Err(self.connection_error(format!(
                "`{from}` does not come before `{to}`"
            )));
        }
        if self.children[dst].system.read_input(to_rest).is_none() {
            return Err(self.connection_error(format!("`{to}` is not a free input")));
        }
        self.connections.push(Connection {
            from,
            child: dst,
            to: to_rest.to_string(),
        });
        Ok(())
    }

    /// Connect `from.field` to `to.field` for every field.
    pub fn connect_port(&mut self, from: &str, to: &str, fields: &[&str]) -> SystemResult<()> {
        for field in fields {
            self.connect(&format!("{from}.{field}"), &format!("{to}.{field}"))?;
        }
        Ok(())
    }

    /// Expose `target` under `alias` at this level.
    pub fn pull(&mut self, alias: &str, target: &str) -> SystemResult<()> {
        let target = self.resolve(target);
        let head = target.split('.').next().unwrap_or_default();
        if self.index_of(head).is_none() {
            return Err(self.connection_error(format!("pull target `{target}` is not a child path")));
        }
        if self.index_of(alias).is_some() {
            return Err(self.connection_error(format!("alias `{alias}` shadows a child")));
        }
        self.pulls.push(Pull {
            alias: alias.to_string(),
            target,
        });
        Ok(())
    }

    /// Add assembly-level terms to the intrinsic method.
    pub fn extend_intrinsic(&mut self, method: &DesignMethod) {
        let resolved = method.map_vars(|v| self.resolve(v));
        self.intrinsic = std::mem::take(&mut self.intrinsic).extend(&resolved);
        self.intrinsic.name = INTRINSIC.to_string();
    }

    /// Register a named method; a method with the same name is replaced.
    pub fn add_design_method(&mut self, method: DesignMethod) {
        let resolved = method.map_vars(|v| self.resolve(v));
        self.methods.retain(|m| m.name != resolved.name);
        self.methods.push(resolved);
    }

    /// A child's named method lifted into this assembly's paths.
    pub fn child_method(&self, child: &str, method: &str) -> SystemResult<DesignMethod> {
        Ok(self.child(child)?.design_method(method)?.prefixed(child))
    }

    pub fn set_outwards(&mut self, outwards: Outwards) {
        self.outwards = Some(outwards);
    }

    fn is_connected(&self, child: usize, path: &str) -> bool {
        self.connections
            .iter()
            .any(|c| c.child == child && c.to == path)
    }
}

impl System for Assembly {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_input(&self, path: &str) -> Option<Real> {
        let path = self.resolve(path);
        let (head, rest) = path.split_once('.')?;
        let idx = self.index_of(head)?;
        if self.is_connected(idx, rest) {
            return None;
        }
        self.children[idx].system.read_input(rest)
    }

    fn get(&self, path: &str) -> SystemResult<Real> {
        if let Some(v) = self.read_input(path) {
            return Ok(v);
        }
        let path = self.resolve(path);
        self.compute()?.value(&self.name, &path)
    }

    fn set(&mut self, path: &str, value: Real) -> SystemResult<()> {
        let resolved = self.resolve(path);
        if let Some((head, rest)) = resolved.split_once('.') {
            if let Some(idx) = self.index_of(head) {
                if self.is_connected(idx, rest) {
                    return Err(SystemError::ReadOnly {
                        system: self.name.clone(),
                        path: resolved,
                    });
                }
                return self.children[idx].system.set(rest, value);
            }
        }
        Err(SystemError::UnknownVariable {
            system: self.name.clone(),
            path: resolved,
        })
    }

    fn compute(&self) -> SystemResult<Snapshot> {
        let mut snap = Snapshot::new();
        for (idx, child) in self.children.iter().enumerate() {
            let mut incoming = self.connections.iter().filter(|c| c.child == idx).peekable();
            let child_snap = if incoming.peek().is_none() {
                child.system.compute()?
            } else {
                let mut system = child.system.boxed_clone();
                for conn in incoming {
                    let value = snap.value(&self.name, &conn.from)?;
                    system.set(&conn.to, value)?;
                }
                system.compute()?
            };
            snap.merge_prefixed(&child.name, child_snap);
        }
        if let Some(outwards) = self.outwards {
            for (path, value) in outwards(&snap)? {
                snap.insert(path, value);
            }
        }
        Ok(snap)
    }

    fn intrinsic(&self) -> DesignMethod {
        let mut method = DesignMethod::new(INTRINSIC);
        for (idx, child) in self.children.iter().enumerate() {
            let mut lifted = child.system.intrinsic().prefixed(&child.name);
            for conn in self.connections.iter().filter(|c| c.child == idx) {
                lifted = lifted.without_unknown(&format!("{}.{}", child.name, conn.to));
            }
            method = method.extend(&lifted);
        }
        method.extend(&self.intrinsic)
    }

    fn design_methods(&self) -> Vec<DesignMethod> {
        self.methods.clone()
    }

    fn resolve(&self, path: &str) -> String {
        let mut path = path.to_string();
        if let Some(pull) = self
            .pulls
            .iter()
            .find(|p| alias_rest(&path, &p.alias).is_some())
        {
            let rest = alias_rest(&path, &pull.alias).unwrap_or_default();
            path = format!("{}{rest}", pull.target);
        }
        if let Some((head, rest)) = path.split_once('.') {
            if let Some(child) = self.children.iter().find(|c| c.name == head) {
                return format!("{head}.{}", child.system.resolve(rest));
            }
        }
        path
    }

    fn boxed_clone(&self) -> Box<dyn System> {
        Box::new(self.clone())
    }
}

impl std::fmt::Debug for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assembly")
            .field("name", &self.name)
            .field("children", &self.child_names().collect::<Vec<_>>())
            .field("connections", &self.connections.len())
            .finish()
    }
}

/// Implement [`System`] for a typed wrapper by delegating to an inner
/// [`Assembly`] field.
///
/// ```ignore
/// #[derive(Clone)]
/// pub struct GasGenerator { assembly: Assembly }
/// tc_system::assembly_system!(GasGenerator, assembly);
/// ```
#[macro_export]
macro_rules! assembly_system {
    ($ty:ty, $field:ident) => {
        impl $crate::System for $ty {
            fn name(&self) -> &str {
                $crate::System::name(&self.$field)
            }
            fn get(&self, path: &str) -> $crate::SystemResult<f64> {
                $crate::System::get(&self.$field, path)
            }
            fn read_input(&self, path: &str) -> ::core::option::Option<f64> {
                $crate::System::read_input(&self.$field, path)
            }
            fn set(&mut self, path: &str, value: f64) -> $crate::SystemResult<()> {
                $crate::System::set(&mut self.$field, path, value)
            }
            fn compute(&self) -> $crate::SystemResult<$crate::Snapshot> {
                $crate::System::compute(&self.$field)
            }
            fn intrinsic(&self) -> $crate::DesignMethod {
                $crate::System::intrinsic(&self.$field)
            }
            fn design_methods(&self) -> ::std::vec::Vec<$crate::DesignMethod> {
                $crate::System::design_methods(&self.$field)
            }
            fn resolve(&self, path: &str) -> ::std::string::String {
                $crate::System::resolve(&self.$field, path)
            }
            fn boxed_clone(&self) -> ::std::boxed::Box<dyn $crate::System> {
                ::std::boxed::Box::new(::core::clone::Clone::clone(self))
            }
        }
    };
}
