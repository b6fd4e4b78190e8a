use std::io::Write;
use tc_config::{Case, ConfigError, ParameterSet, apply};
use tc_core::{FluidState, Real, variables};
use tc_system::{Component, System, SystemError, SystemResult};

#[derive(Clone, Debug, Default)]
struct HeaterIn {
    fl_in: FluidState,
    q: Real,
}
variables!(HeaterIn { q } nested { fl_in });

#[derive(Clone, Debug, Default)]
struct HeaterOut {
    tt_out: Real,
}
variables!(HeaterOut { tt_out });

#[derive(Clone)]
struct Heater {
    inputs: HeaterIn,
}

impl Component for Heater {
    type Inputs = HeaterIn;
    type Outputs = HeaterOut;

    fn name(&self) -> &str {
        "heater"
    }
    fn inputs(&self) -> &HeaterIn {
        &self.inputs
    }
    fn inputs_mut(&mut self) -> &mut HeaterIn {
        &mut self.inputs
    }
    fn evaluate(&self) -> SystemResult<HeaterOut> {
        let i = &self.inputs;
        Ok(HeaterOut {
            tt_out: i.fl_in.tt + i.q / (1004.5 * i.fl_in.w),
        })
    }
}

fn heater() -> Heater {
    Heater {
        inputs: HeaterIn::default(),
    }
}

#[test]
fn yaml_parameters_reach_the_system() {
    let params = ParameterSet::from_yaml_str("fl_in:\n  tt: 300\n  w: 2.0\nq: 20090\n").unwrap();
    let mut h = heater();
    apply(&mut h, &params).unwrap();
    assert_eq!(h.get("fl_in.tt").unwrap(), 300.0);
    assert!((h.get("tt_out").unwrap() - 310.0).abs() < 1e-9);
}

#[test]
fn outputs_cannot_be_configured() {
    let params = ParameterSet::from_json_str(r#"{"tt_out": 5.0}"#).unwrap();
    let err = apply(&mut heater(), &params).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::System(SystemError::ReadOnly { .. })
    ));
}

#[test]
fn case_files_load_from_disk() {
    let dir = std::env::temp_dir().join(format!("tc-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("heater.yml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "method: warmup\nparameters:\n  q: 1000.0").unwrap();
    drop(file);

    let case = Case::load(&path).unwrap();
    assert_eq!(case.method.as_deref(), Some("warmup"));
    assert_eq!(case.parameters.get("q"), Some(1000.0));

    let params = ParameterSet::load(&path);
    assert!(params.is_err(), "a case file is not a flat parameter table");
    std::fs::remove_dir_all(&dir).unwrap();
}
