use approx::assert_relative_eq;
use tc_core::{Real, variables};
use tc_system::{
    Assembly, Component, DesignMethod, Equation, Snapshot, System, SystemError, SystemResult,
    assembly_system,
};

#[derive(Clone, Debug, Default)]
struct Port {
    x: Real,
}
variables!(Port { x });

#[derive(Clone, Debug, Default)]
struct StageIn {
    gain: Real,
    port_in: Port,
}
variables!(StageIn { gain } nested { port_in });

#[derive(Clone, Debug, Default)]
struct StageOut {
    port_out: Port,
    eps: Real,
}
variables!(StageOut { eps } nested { port_out });

/// `port_out.x = gain * port_in.x`, closure `eps = port_out.x - 12`.
#[derive(Clone)]
struct Stage {
    name: String,
    inputs: StageIn,
}

impl Stage {
    fn new(name: &str, gain: Real, x: Real) -> Self {
        Self {
            name: name.to_string(),
            inputs: StageIn {
                gain,
                port_in: Port { x },
            },
        }
    }
}

impl Component for Stage {
    type Inputs = StageIn;
    type Outputs = StageOut;

    fn name(&self) -> &str {
        &self.name
    }
    fn inputs(&self) -> &StageIn {
        &self.inputs
    }
    fn inputs_mut(&mut self) -> &mut StageIn {
        &mut self.inputs
    }
    fn evaluate(&self) -> SystemResult<StageOut> {
        if self.inputs.gain < 0.0 {
            return Err(SystemError::Domain {
                system: self.name.clone(),
                what: "negative gain".into(),
            });
        }
        let x = self.inputs.gain * self.inputs.port_in.x;
        Ok(StageOut {
            port_out: Port { x },
            eps: x - 12.0,
        })
    }
    fn intrinsic(&self) -> DesignMethod {
        DesignMethod::new("intrinsic")
            .unknown("port_in.x")
            .equation(Equation::zero("eps"))
    }
    fn design_methods(&self) -> Vec<DesignMethod> {
        vec![DesignMethod::new("sizing").unknown("gain").target("port_out.x")]
    }
}

fn chain() -> Assembly {
    let mut asm = Assembly::new("chain");
    asm.add_child(Stage::new("first", 2.0, 1.5)).unwrap();
    asm.add_child(Stage::new("second", 4.0, 0.0)).unwrap();
    asm.connect("first.port_out.x", "second.port_in.x").unwrap();
    asm
}

#[test]
fn connections_propagate_in_order() {
    let asm = chain();
    let snap = asm.compute().unwrap();
    assert_relative_eq!(snap.get("first.port_out.x").unwrap(), 3.0);
    assert_relative_eq!(snap.get("second.port_in.x").unwrap(), 3.0);
    assert_relative_eq!(snap.get("second.port_out.x").unwrap(), 12.0);
    assert_relative_eq!(asm.get("second.eps").unwrap(), 0.0);
}

#[test]
fn connected_input_is_dropped_from_intrinsic() {
    let asm = chain();
    let m = asm.intrinsic();
    let unknowns: Vec<_> = m.unknowns.iter().map(|u| u.var.as_str()).collect();
    assert_eq!(unknowns, vec!["first.port_in.x"]);
    assert_eq!(m.n_equations(), 2);
}

#[test]
fn connected_input_rejects_writes() {
    let mut asm = chain();
    assert!(matches!(
        asm.set("second.port_in.x", 1.0),
        Err(SystemError::ReadOnly { .. })
    ));
    assert!(asm.read_input("second.port_in.x").is_none());
    asm.set("first.port_in.x", 2.0).unwrap();
    assert_relative_eq!(asm.get("second.port_out.x").unwrap(), 16.0);
}

#[test]
fn invalid_connections_are_rejected() {
    let mut asm = chain();
    let backwards = asm.connect("second.port_out.x", "first.gain");
    assert!(matches!(backwards, Err(SystemError::Connection { .. })));
    let to_output = asm.connect("first.port_out.x", "second.eps");
    assert!(matches!(to_output, Err(SystemError::Connection { .. })));
    let missing = asm.connect("first.port_out.x", "third.gain");
    assert!(matches!(missing, Err(SystemError::Connection { .. })));
    assert!(asm.add_child(Stage::new("first", 1.0, 1.0)).is_err());
}

#[test]
fn pulls_resolve_recursively() {
    let mut inner = chain();
    inner.pull("port_in", "first.port_in").unwrap();
    inner.pull("k", "second.gain").unwrap();

    let mut outer = Assembly::new("outer");
    outer.add_child(inner).unwrap();
    outer.pull("feed", "chain.port_in").unwrap();

    assert_eq!(outer.resolve("feed.x"), "chain.first.port_in.x");
    assert_eq!(outer.resolve("chain.k"), "chain.second.gain");
    assert_eq!(outer.resolve("chain.port_out"), "chain.port_out");

    outer.set("feed.x", 0.5).unwrap();
    outer.set("chain.k", 10.0).unwrap();
    let snap = outer.compute().unwrap();
    assert_relative_eq!(snap.get("chain.second.port_out.x").unwrap(), 10.0);
}

#[test]
fn methods_are_stored_canonical() {
    let mut asm = chain();
    asm.pull("k", "second.gain").unwrap();
    asm.extend_intrinsic(&DesignMethod::new("extra").unknown("k"));
    asm.add_design_method(DesignMethod::new("sizing").unknown("k").target("second.port_out.x"));
    asm.add_design_method(
        DesignMethod::new("sizing")
            .unknown("k")
            .target_value("second.port_out.x", 20.0),
    );

    let intrinsic = asm.intrinsic();
    assert_eq!(intrinsic.name, "intrinsic");
    assert!(intrinsic.unknowns.iter().any(|u| u.var == "second.gain"));

    let methods = asm.design_methods();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].unknowns[0].var, "second.gain");
    assert_eq!(methods[0].targets[0].value, Some(20.0));

    let lifted = asm.child_method("first", "sizing").unwrap();
    assert_eq!(lifted.unknowns[0].var, "first.gain");
    assert_eq!(lifted.targets[0].var, "first.port_out.x");
}

fn total(snap: &Snapshot) -> SystemResult<Vec<(String, Real)>> {
    let a = snap.value("chain", "first.port_out.x")?;
    let b = snap.value("chain", "second.port_out.x")?;
    Ok(vec![("total".to_string(), a + b)])
}

#[test]
fn outwards_extend_the_snapshot() {
    let mut asm = chain();
    asm.set_outwards(total);
    assert_relative_eq!(asm.get("total").unwrap(), 15.0);
    assert!(matches!(
        asm.set("total", 1.0),
        Err(SystemError::UnknownVariable { .. })
    ));
}

#[test]
fn child_errors_surface_from_compute() {
    let mut asm = chain();
    asm.set("second.gain", -1.0).unwrap();
    let err = asm.compute().unwrap_err();
    assert!(err.is_recoverable());
}

#[derive(Clone)]
struct Wrapped {
    assembly: Assembly,
}
assembly_system!(Wrapped, assembly);

#[test]
fn typed_wrapper_delegates() {
    let mut w = Wrapped { assembly: chain() };
    let sys: &mut dyn System = &mut w;
    assert_eq!(sys.name(), "chain");
    sys.set("first.gain", 3.0).unwrap();
    assert_relative_eq!(sys.get("second.port_out.x").unwrap(), 18.0);
    assert_eq!(sys.intrinsic().unknowns.len(), 1);
    let boxed = sys.boxed_clone();
    assert_relative_eq!(boxed.get("first.gain").unwrap(), 3.0);
}
