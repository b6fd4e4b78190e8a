//! Dotted-path access to the scalar fields of records.
//!
//! Every input and output record of a component exposes its scalars through
//! [`Variables`], so that solvers, connections and configuration loaders can
//! address them as `fl_in.pt` or `kp.inlet_tip.r` without knowing the
//! concrete type. Implementations are normally generated with
//! [`variables!`](crate::variables).

use crate::Real;
use std::collections::BTreeMap;

/// Flat, ordered `path -> value` map.
pub type VarMap = BTreeMap<String, Real>;

pub trait Variables {
    /// Value at `path`, `None` if the path does not exist.
    fn read(&self, path: &str) -> Option<Real>;

    /// Write `value` at `path`. Returns false if the path does not exist.
    fn write(&mut self, path: &str, value: Real) -> bool;

    /// Insert every scalar under `prefix` into `out`.
    fn export(&self, prefix: &str, out: &mut VarMap);

    /// Every scalar as a fresh map.
    fn to_map(&self) -> VarMap {
        let mut out = VarMap::new();
        self.export("", &mut out);
        out
    }
}

/// `prefix.name`, or `name` when prefix is empty.
pub fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Remainder of `path` after the leading segment `head`, if it matches.
pub fn strip_segment<'a>(path: &'a str, head: &str) -> Option<&'a str> {
    path.strip_prefix(head)?.strip_prefix('.')
}

/// Implement [`Variables`] for a struct of `Real` fields and nested records.
///
/// ```
/// use tc_core::{variables, Real, Variables, FluidState};
///
/// #[derive(Default)]
/// struct Duct {
///     loss: Real,
///     fl_in: FluidState,
/// }
/// variables!(Duct { loss } nested { fl_in });
///
/// let mut d = Duct::default();
/// assert!(d.write("fl_in.w", 12.0));
/// assert_eq!(d.read("fl_in.w"), Some(12.0));
/// assert_eq!(d.read("nope"), None);
/// ```
#[macro_export]
macro_rules! variables {
    ($ty:ty { $($field:ident),* $(,)? } $(nested { $($port:ident),* $(,)? })?) => {
        impl $crate::vars::Variables for $ty {
            fn read(&self, path: &str) -> ::core::option::Option<$crate::Real> {
                match path {
                    $(stringify!($field) => ::core::option::Option::Some(self.$field),)*
                    _ => {
                        $($(
                            if let ::core::option::Option::Some(rest) =
                                $crate::vars::strip_segment(path, stringify!($port))
                            {
                                return $crate::vars::Variables::read(&self.$port, rest);
                            }
                        )*)?
                        ::core::option::Option::None
                    }
                }
            }

            fn write(&mut self, path: &str, value: $crate::Real) -> bool {
                match path {
                    $(stringify!($field) => {
                        self.$field = value;
                        true
                    })*
                    _ => {
                        $($(
                            if let ::core::option::Option::Some(rest) =
                                $crate::vars::strip_segment(path, stringify!($port))
                            {
                                return $crate::vars::Variables::write(&mut self.$port, rest, value);
                            }
                        )*)?
                        false
                    }
                }
            }

            fn export(&self, prefix: &str, out: &mut $crate::vars::VarMap) {
                $(out.insert($crate::vars::join(prefix, stringify!($field)), self.$field);)*
                $($(
                    $crate::vars::Variables::export(
                        &self.$port,
                        &$crate::vars::join(prefix, stringify!($port)),
                        out,
                    );
                )*)?
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FluidState, KeypointSet};

    #[derive(Default)]
    struct Sensor {
        gain: Real,
        fl: FluidState,
        kp: KeypointSet,
    }
    crate::variables!(Sensor { gain } nested { fl, kp });

    #[test]
    fn nested_paths_read_and_write() {
        let mut p = Sensor::default();
        assert!(p.write("gain", 2.5));
        assert!(p.write("fl.tt", 400.0));
        assert!(p.write("kp.exit_tip.r", 0.7));
        assert_eq!(p.read("gain"), Some(2.5));
        assert_eq!(p.read("fl.tt"), Some(400.0));
        assert_eq!(p.read("kp.exit_tip.r"), Some(0.7));
    }

    #[test]
    fn unknown_paths_are_rejected() {
        let mut p = Sensor::default();
        assert!(!p.write("fl.nope", 1.0));
        assert!(!p.write("flx.pt", 1.0));
        assert_eq!(p.read("kp.inlet_tip"), None);
    }

    #[test]
    fn export_lists_every_scalar() {
        let map = Sensor::default().to_map();
        assert!(map.contains_key("gain"));
        assert!(map.contains_key("fl.pt"));
        assert!(map.contains_key("kp.inlet_hub.z"));
        assert_eq!(map.len(), 1 + 3 + 8);
    }

    #[test]
    fn join_and_strip() {
        assert_eq!(join("", "w"), "w");
        assert_eq!(join("fl_in", "w"), "fl_in.w");
        assert_eq!(strip_segment("fl_in.w", "fl_in"), Some("w"));
        assert_eq!(strip_segment("fl_inx.w", "fl_in"), None);
    }
}
