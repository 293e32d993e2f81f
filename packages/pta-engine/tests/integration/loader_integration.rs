//! JSON program loading, analysed end to end

#[path = "../common/mod.rs"]
mod common;

use std::io::Write;

use common::{fixture, pts};
use pretty_assertions::assert_eq;
use pta_engine::features::program::ProgramSpec;
use pta_engine::{load_program, AnalysisConfig, PointerAnalysis, ProgramError, PtaError};
use tempfile::NamedTempFile;

#[test]
fn test_dispatch_fixture() {
    let program = load_program(fixture("dispatch.json")).unwrap();
    let result = PointerAnalysis::new(&program, AnalysisConfig::default())
        .run()
        .unwrap();

    let main = program.entry_method().unwrap();
    let report = result.report(&program, 10);
    assert_eq!(
        report.reachable_methods,
        vec![
            "Dog.speak()".to_string(),
            "Main.make()".to_string(),
            "Main.main()".to_string(),
        ]
    );
    assert_eq!(report.call_edges.len(), 2);
    assert_eq!(
        report.points_to.get("Main.main()/s"),
        Some(&vec!["new Dog@Main.make()#0".to_string()])
    );

    // The cat is allocated but never receives a call
    let cat = program.class_by_name("Cat").unwrap();
    let cat_speak = program.method_by_name(cat, "speak").unwrap();
    assert!(!result.is_reachable(cat_speak));
    assert_eq!(pts(&result, &program, main, "unused").len(), 1);
}

#[test]
fn test_registry_fixture() {
    let program = load_program(fixture("registry.json")).unwrap();
    let result = PointerAnalysis::new(&program, AnalysisConfig::default())
        .run()
        .unwrap();
    let main = program.entry_method().unwrap();

    assert_eq!(pts(&result, &program, main, "h"), pts(&result, &program, main, "e"));
    assert_eq!(pts(&result, &program, main, "first"), pts(&result, &program, main, "m"));
    assert_eq!(pts(&result, &program, main, "r"), pts(&result, &program, main, "m"));
    assert_eq!(result.stats().unsupported_statements, 1);

    let report = result.report(&program, 10);
    assert_eq!(
        report.points_to.get("App.main()/r"),
        Some(&vec!["new Object@App.main()#3".to_string()])
    );
    assert!(report
        .call_edges
        .iter()
        .any(|e| e.kind == "INTERFACE" && e.callee == "Echo.handle(Object)"));
}

#[test]
fn test_broken_reference_fails_analysis() {
    let program = load_program(fixture("broken_reference.json")).unwrap();
    let err = PointerAnalysis::new(&program, AnalysisConfig::default())
        .run()
        .err()
        .expect("unresolved reference");
    assert!(matches!(err, PtaError::UnresolvedMethod { .. }));
    assert_eq!(err.to_string(), "Unresolved method reference: Main.helper()");
}

#[test]
fn test_spec_round_trip_through_file() {
    let original = std::fs::read_to_string(fixture("registry.json")).unwrap();
    let spec = ProgramSpec::from_json_str(&original).unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(spec.to_json_string().unwrap().as_bytes()).unwrap();

    let reloaded = load_program(file.path()).unwrap();
    let direct = spec.build().unwrap();
    assert_eq!(reloaded.num_classes(), direct.num_classes());
    assert_eq!(reloaded.num_methods(), direct.num_methods());
    assert_eq!(reloaded.num_vars(), direct.num_vars());
}

#[test]
fn test_malformed_json_is_a_program_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{ \"entry\": ").unwrap();
    let err = load_program(file.path()).unwrap_err();
    assert!(matches!(err, ProgramError::Json(_)));

    let missing = load_program(fixture("does_not_exist.json")).unwrap_err();
    assert!(matches!(missing, ProgramError::Io(_)));
}

fn load_str(json: &str) -> Result<pta_engine::Program, ProgramError> {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    load_program(file.path())
}

#[test]
fn test_cyclic_superclass_is_rejected_at_load() {
    let err = load_str(
        r#"{
        "entry": { "class": "Main", "method": "main()" },
        "classes": [
            { "name": "A", "super": "B", "methods": [{ "name": "foo" }] },
            { "name": "B", "super": "A" },
            { "name": "Main", "methods": [
                { "name": "main", "static": true, "body": [
                    { "op": "new", "lhs": "x", "type": "A" },
                    { "op": "invoke", "kind": "virtual", "receiver": "x", "class": "A", "method": "foo()" }
                ]}
            ]}
        ]
    }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ProgramError::Malformed(_)));
    assert!(err.to_string().contains("cyclic superclass chain"));
}

#[test]
fn test_call_with_spaced_parameter_list_resolves() {
    let program = load_str(
        r#"{
        "entry": { "class": "A", "method": "main()" },
        "classes": [
            { "name": "A", "methods": [
                { "name": "id", "static": true, "returns": ["p"],
                  "params": [{ "name": "p", "type": "A" }, { "name": "q", "type": "A" }] },
                { "name": "main", "static": true, "body": [
                    { "op": "new", "lhs": "x", "type": "A" },
                    { "op": "invoke", "kind": "static", "result": "y", "class": "A",
                      "method": "id(A, A)", "args": ["x", "x"] }
                ]}
            ]}
        ]
    }"#,
    )
    .unwrap();

    let result = PointerAnalysis::new(&program, AnalysisConfig::default())
        .run()
        .unwrap();
    let main = program.entry_method().unwrap();
    assert_eq!(pts(&result, &program, main, "y"), pts(&result, &program, main, "x"));
    assert_eq!(result.call_graph().num_edges(), 1);
}
