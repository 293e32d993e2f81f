//! End-to-end pointer analysis tests over hand-built programs

#[path = "../common/mod.rs"]
mod common;

use common::builders;
use common::{pts, var};
use pretty_assertions::assert_eq;
use pta_engine::{
    AnalysisConfig, CallKind, FieldRef, MethodKind, MethodRef, PointerAnalysis, ProgramBuilder,
    PtaError, Subsignature, WorklistOrder,
};

fn run(program: &pta_engine::Program) -> pta_engine::PointerAnalysisResult {
    PointerAnalysis::new(program, AnalysisConfig::default())
        .run()
        .expect("analysis succeeds")
}

#[test]
fn test_copy_makes_aliases() {
    let (program, main) = builders::aliasing();
    let result = run(&program);

    let a = pts(&result, &program, main, "a");
    assert_eq!(a.len(), 1);
    assert_eq!(pts(&result, &program, main, "b"), a);

    let (va, vb, vc) = (
        var(&program, main, "a"),
        var(&program, main, "b"),
        var(&program, main, "c"),
    );
    assert!(result.may_alias(va, vb));
    assert!(!result.may_alias(va, vc));

    let objs = result.points_to_objects(va);
    assert_eq!(objs[0].describe(&program), "new A@Main.main()#0");
}

#[test]
fn test_virtual_call_follows_receiver_objects() {
    let d = builders::virtual_dispatch(false);
    let result = run(&d.program);
    let cg = result.call_graph();

    assert_eq!(cg.num_edges(), 1);
    let edge = cg.edges()[0];
    assert_eq!(edge.kind, CallKind::Virtual);
    assert_eq!(edge.callee, d.b_foo);
    assert_eq!(edge.caller(), d.main);
    assert!(!result.is_reachable(d.a_foo));
    assert!(!result.is_reachable(d.c_foo));
    assert_eq!(result.callers_of(d.b_foo), &[edge.call_site]);
}

#[test]
fn test_second_receiver_type_adds_second_edge() {
    let d = builders::virtual_dispatch(true);
    let result = run(&d.program);
    let cg = result.call_graph();

    assert_eq!(cg.num_edges(), 2);
    assert!(result.is_reachable(d.b_foo));
    assert!(result.is_reachable(d.c_foo));
    assert!(!result.is_reachable(d.a_foo));

    let site = cg.edges()[0].call_site;
    let mut callees = result.callees_of(site).to_vec();
    callees.sort();
    assert_eq!(callees, vec![d.b_foo, d.c_foo]);
}

#[test]
fn test_static_field_flow() {
    let (program, main) = builders::static_field();
    let result = run(&program);

    let y = pts(&result, &program, main, "y");
    let z = pts(&result, &program, main, "z");
    assert!(!y.is_empty());
    assert!(y.iter().all(|o| z.contains(o)));

    let t = program.class_by_name("T").unwrap();
    let field = program.class(t).fields[0];
    assert_eq!(result.points_to_static_field(field).len(), 1);
}

#[test]
fn test_unreachable_method_contributes_nothing() {
    let (program, main, dead) = builders::unreachable();
    let result = run(&program);

    assert!(result.is_reachable(main));
    assert!(!result.is_reachable(dead));
    assert_eq!(result.objects().len(), 1);
    assert!(pts(&result, &program, dead, "y").is_empty());
    assert!(pts(&result, &program, dead, "z").is_empty());
    assert_eq!(result.call_graph().num_edges(), 0);
}

#[test]
fn test_field_flow_through_calls_is_context_insensitive() {
    let (program, main) = builders::boxes();
    let result = run(&program);

    let i1 = pts(&result, &program, main, "i1");
    let i2 = pts(&result, &program, main, "i2");
    let mut both: Vec<_> = i1.iter().chain(i2.iter()).copied().collect();
    both.sort();

    // One `set` for both boxes, so both payloads reach both getters
    assert_eq!(pts(&result, &program, main, "r1"), both);
    assert_eq!(pts(&result, &program, main, "r2"), both);

    let b1 = pts(&result, &program, main, "b1")[0];
    let value = program.class(program.class_by_name("Box").unwrap()).fields[0];
    assert_eq!(result.points_to_instance_field(b1, value).len(), 2);

    let special = result.call_graph().edges_of_kind(CallKind::Special).count();
    assert_eq!(special, 2);
}

#[test]
fn test_interface_dispatch_with_default_method() {
    let (program, main, default_name, circle_name) = builders::interfaces();
    let result = run(&program);

    assert!(result.is_reachable(default_name));
    assert!(result.is_reachable(circle_name));
    assert_eq!(result.call_graph().edges_of_kind(CallKind::Interface).count(), 2);

    // Only the square reaches the default method's `this`
    let s = pts(&result, &program, main, "s");
    assert_eq!(pts(&result, &program, main, "n1"), s);
    assert!(pts(&result, &program, main, "n2").is_empty());
}

#[test]
fn test_array_slot_shared_by_aliases() {
    let (program, main) = builders::arrays();
    let result = run(&program);

    let p = pts(&result, &program, main, "p");
    assert_eq!(pts(&result, &program, main, "q"), p);

    let arr = pts(&result, &program, main, "arr")[0];
    assert_eq!(result.points_to_array(arr).iter().collect::<Vec<_>>(), p);
}

#[test]
fn test_worklist_order_does_not_change_results() {
    let (program, main) = builders::boxes();
    let fifo = PointerAnalysis::new(&program, AnalysisConfig::default())
        .run()
        .unwrap();
    let lifo = PointerAnalysis::new(
        &program,
        AnalysisConfig::default().worklist_order(WorklistOrder::Lifo),
    )
    .run()
    .unwrap();

    for v in program.var_ids() {
        assert_eq!(
            fifo.points_to_var(v).len(),
            lifo.points_to_var(v).len(),
            "{}",
            program.var_signature(v)
        );
    }
    assert_eq!(fifo.call_graph().sorted_edges(), lifo.call_graph().sorted_edges());
    assert_eq!(
        fifo.call_graph().sorted_reachable_methods(),
        lifo.call_graph().sorted_reachable_methods()
    );
    assert_eq!(fifo.stats().objects, lifo.stats().objects);
    assert!(fifo.is_reachable(main));
}

#[test]
fn test_unresolved_method_fails_fast() {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A").unwrap();
    let main = {
        let mut m = b.add_method(a, "main", &[], MethodKind::Static).unwrap();
        m.new_object("x", a)
            .invoke_virtual(None, "x", MethodRef::new(a, Subsignature::new("missing", &[])), &[]);
        m.id()
    };
    b.set_entry(main);
    let program = b.build();

    let err = PointerAnalysis::new(&program, AnalysisConfig::default())
        .run()
        .err()
        .expect("unresolved reference must fail");
    assert!(matches!(err, PtaError::UnresolvedMethod { .. }));
    assert_eq!(err.to_string(), "Unresolved method reference: A.missing()");
}

#[test]
fn test_unresolved_instance_field_fails_fast() {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A").unwrap();
    let main = {
        let mut m = b.add_method(a, "main", &[], MethodKind::Static).unwrap();
        m.new_object("x", a).load_field("y", "x", FieldRef::new(a, "nope"));
        m.id()
    };
    b.set_entry(main);
    let program = b.build();

    let err = PointerAnalysis::new(&program, AnalysisConfig::default())
        .run()
        .err()
        .expect("unresolved reference must fail");
    assert!(err.is_unresolved_reference());
}

#[test]
fn test_unsupported_statement_keeps_rest_of_program() {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A").unwrap();
    let main = {
        let mut m = b.add_method(a, "main", &[], MethodKind::Static).unwrap();
        m.new_object("x", a)
            .unsupported("y = (A) reflect.newInstance()")
            .copy("z", "x");
        m.id()
    };
    b.set_entry(main);
    let program = b.build();

    let result = run(&program);
    assert_eq!(result.stats().unsupported_statements, 1);
    assert_eq!(pts(&result, &program, main, "z"), pts(&result, &program, main, "x"));
    assert!(pts(&result, &program, main, "y").is_empty());
}

#[test]
fn test_abstract_target_is_reported_not_fatal() {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A").unwrap();
    b.set_abstract(a);
    b.add_method(a, "run", &[], MethodKind::Abstract).unwrap();
    let main = {
        let mut m = b.add_method(a, "main", &[], MethodKind::Static).unwrap();
        // Allocation of an abstract class: nothing to dispatch to
        m.new_object("x", a)
            .invoke_virtual(None, "x", MethodRef::new(a, Subsignature::new("run", &[])), &[]);
        m.id()
    };
    b.set_entry(main);
    let program = b.build();

    let result = run(&program);
    assert_eq!(result.stats().unresolved_dispatches, 1);
    assert_eq!(result.call_graph().num_edges(), 0);
}

#[test]
fn test_report_lists_points_to_by_name() {
    let (program, _) = builders::aliasing();
    let result = run(&program);
    let report = result.report(&program, 10);

    assert_eq!(report.heap_model.as_deref(), Some("allocation_site"));
    assert_eq!(
        report.points_to.get("Main.main()/b"),
        Some(&vec!["new A@Main.main()#0".to_string()])
    );
    assert_eq!(report.reachable_methods, vec!["Main.main()".to_string()]);
    assert!(report.call_edges.is_empty());
    assert_eq!(report.stats.as_ref().map(|s| s.objects), Some(2));

    let json = report.to_json().unwrap();
    assert!(json.contains("\"algorithm\": \"pta\""));
}
