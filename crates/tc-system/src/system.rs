//! The `System` contract and the typed `Component` leaf.

use crate::error::{SystemError, SystemResult};
use crate::method::{DesignMethod, INTRINSIC};
use crate::snapshot::Snapshot;
use tc_core::{Real, Variables};

/// Anything the solver can drive.
///
/// `compute` never mutates: it reads the current inputs and returns every
/// input and output in one [`Snapshot`]. Paths handed to `get`/`set` may use
/// aliases; [`System::resolve`] maps them to the canonical form used in
/// snapshots and design methods.
pub trait System: Send + Sync {
    fn name(&self) -> &str;

    fn get(&self, path: &str) -> SystemResult<Real>;

    /// Stored value of a free input, `None` for outputs, connected inputs
    /// and unknown paths.
    fn read_input(&self, path: &str) -> Option<Real>;

    /// Write a free input. Outputs and connected inputs are rejected.
    fn set(&mut self, path: &str, value: Real) -> SystemResult<()>;

    fn compute(&self) -> SystemResult<Snapshot>;

    /// Closure equations that always apply to this system.
    fn intrinsic(&self) -> DesignMethod {
        DesignMethod::new(INTRINSIC)
    }

    /// Named design methods, excluding the intrinsic one.
    fn design_methods(&self) -> Vec<DesignMethod> {
        Vec::new()
    }

    fn design_method(&self, name: &str) -> SystemResult<DesignMethod> {
        if name == INTRINSIC {
            return Ok(self.intrinsic());
        }
        self.design_methods()
            .into_iter()
            .find(|m| m.name == name)
            .ok_or_else(|| SystemError::UnknownDesignMethod {
                system: self.name().to_string(),
                name: name.to_string(),
            })
    }

    /// Canonical form of `path`.
    fn resolve(&self, path: &str) -> String {
        path.to_string()
    }

    fn boxed_clone(&self) -> Box<dyn System>;
}

impl Clone for Box<dyn System> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

impl std::fmt::Debug for dyn System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System").field("name", &self.name()).finish()
    }
}

/// A leaf model with a typed inputs record and a typed outputs record.
///
/// Every `Component` is a [`System`]: inputs are settable by path, outputs
/// are read-only and produced by `evaluate`.
pub trait Component: Clone + Send + Sync + 'static {
    type Inputs: Variables;
    type Outputs: Variables + Default;

    fn name(&self) -> &str;

    fn inputs(&self) -> &Self::Inputs;

    fn inputs_mut(&mut self) -> &mut Self::Inputs;

    fn evaluate(&self) -> SystemResult<Self::Outputs>;

    fn intrinsic(&self) -> DesignMethod {
        DesignMethod::new(INTRINSIC)
    }

    fn design_methods(&self) -> Vec<DesignMethod> {
        Vec::new()
    }
}

impl<C: Component> System for C {
    fn name(&self) -> &str {
        Component::name(self)
    }

    fn read_input(&self, path: &str) -> Option<Real> {
        self.inputs().read(path)
    }

    fn get(&self, path: &str) -> SystemResult<Real> {
        if let Some(v) = self.inputs().read(path) {
            return Ok(v);
        }
        if C::Outputs::default().read(path).is_some() {
            if let Some(v) = self.evaluate()?.read(path) {
                return Ok(v);
            }
        }
        Err(SystemError::UnknownVariable {
            system: Component::name(self).to_string(),
            path: path.to_string(),
        })
    }

    fn set(&mut self, path: &str, value: Real) -> SystemResult<()> {
        if self.inputs_mut().write(path, value) {
            return Ok(());
        }
        let system = Component::name(self).to_string();
        let path = path.to_string();
        if C::Outputs::default().read(&path).is_some() {
            Err(SystemError::ReadOnly { system, path })
        } else {
            Err(SystemError::UnknownVariable { system, path })
        }
    }

    fn compute(&self) -> SystemResult<Snapshot> {
        let outputs = self.evaluate()?;
        let mut values = self.inputs().to_map();
        outputs.export("", &mut values);
        Ok(Snapshot::from(values))
    }

    fn intrinsic(&self) -> DesignMethod {
        Component::intrinsic(self)
    }

    fn design_methods(&self) -> Vec<DesignMethod> {
        Component::design_methods(self)
    }

    fn boxed_clone(&self) -> Box<dyn System> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::variables;

    #[derive(Clone, Debug, Default)]
    struct Gain {
        k: Real,
        x: Real,
    }
    variables!(Gain { k, x });

    #[derive(Clone, Debug, Default)]
    struct GainOut {
        y: Real,
    }
    variables!(GainOut { y });

    #[derive(Clone)]
    struct Amplifier {
        inputs: Gain,
    }

    impl Component for Amplifier {
        type Inputs = Gain;
        type Outputs = GainOut;

        fn name(&self) -> &str {
            "amp"
        }
        fn inputs(&self) -> &Gain {
            &self.inputs
        }
        fn inputs_mut(&mut self) -> &mut Gain {
            &mut self.inputs
        }
        fn evaluate(&self) -> SystemResult<GainOut> {
            Ok(GainOut {
                y: self.inputs.k * self.inputs.x,
            })
        }
        fn design_methods(&self) -> Vec<DesignMethod> {
            vec![DesignMethod::new("gain").unknown("k").target("y")]
        }
    }

    fn amp() -> Amplifier {
        Amplifier {
            inputs: Gain { k: 2.0, x: 3.0 },
        }
    }

    #[test]
    fn component_is_a_system() {
        let mut sys: Box<dyn System> = Box::new(amp());
        assert_eq!(sys.get("y").unwrap(), 6.0);
        sys.set("x", 4.0).unwrap();
        let snap = sys.compute().unwrap();
        assert_eq!(snap.get("y"), Some(8.0));
        assert_eq!(snap.get("k"), Some(2.0));
        assert_eq!(snap.len(), 3);
    }

    #[test]
    fn outputs_are_read_only() {
        let mut a = amp();
        assert!(matches!(a.set("y", 1.0), Err(SystemError::ReadOnly { .. })));
        assert!(matches!(
            a.set("z", 1.0),
            Err(SystemError::UnknownVariable { .. })
        ));
        assert!(matches!(
            System::get(&a, "z"),
            Err(SystemError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn design_method_lookup() {
        let a = amp();
        assert_eq!(a.design_method("gain").unwrap().unknowns.len(), 1);
        assert!(a.design_method(INTRINSIC).unwrap().is_empty());
        assert!(matches!(
            a.design_method("missing"),
            Err(SystemError::UnknownDesignMethod { .. })
        ));
    }

    #[test]
    fn boxed_clone_is_independent() {
        let a: Box<dyn System> = Box::new(amp());
        let mut b = a.clone();
        b.set("k", 10.0).unwrap();
        assert_eq!(a.get("k").unwrap(), 2.0);
        assert_eq!(b.get("y").unwrap(), 30.0);
    }
}
