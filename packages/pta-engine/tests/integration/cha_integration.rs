//! Class hierarchy analysis call graph vs. the on-the-fly call graph

#[path = "../common/mod.rs"]
mod common;

use common::builders;
use pretty_assertions::assert_eq;
use pta_engine::{
    build_call_graph, to_dot, AnalysisConfig, AnalysisReport, CallGraphAlgorithm, CallKind,
    ChaBuilder, ClassHierarchy, Program,
};

fn cha(program: &Program) -> pta_engine::CallGraph {
    let hierarchy = ClassHierarchy::new(program);
    ChaBuilder::new(&hierarchy).build().expect("cha succeeds")
}

#[test]
fn test_cha_resolves_every_override() {
    let d = builders::virtual_dispatch(false);
    let cg = cha(&d.program);

    assert_eq!(cg.num_edges(), 3);
    for m in [d.a_foo, d.b_foo, d.c_foo] {
        assert!(cg.contains(m));
    }
    assert_eq!(cg.edges_of_kind(CallKind::Virtual).count(), 3);
}

#[test]
fn test_pta_graph_is_subgraph_of_cha() {
    let programs = [
        builders::virtual_dispatch(false).program,
        builders::virtual_dispatch(true).program,
        builders::boxes().0,
        builders::interfaces().0,
    ];

    for program in &programs {
        let cha_graph = cha(program);
        let pta_graph = build_call_graph(program, &AnalysisConfig::default()).unwrap();

        for edge in pta_graph.edges() {
            assert!(
                cha_graph.has_edge(edge.call_site, edge.callee),
                "missing in CHA: {} -> {}",
                program.site_signature(edge.call_site),
                program.method_signature(edge.callee)
            );
        }
        for &m in pta_graph.reachable_methods() {
            assert!(cha_graph.contains(m));
        }
    }
}

#[test]
fn test_cha_ignores_unreachable_methods() {
    let (program, main, dead) = builders::unreachable();
    let cg = cha(&program);
    assert!(cg.contains(main));
    assert!(!cg.contains(dead));
}

#[test]
fn test_interface_cha_includes_default_and_override() {
    let (program, _, default_name, circle_name) = builders::interfaces();
    let cg = cha(&program);
    assert!(cg.contains(default_name));
    assert!(cg.contains(circle_name));
}

#[test]
fn test_config_selects_cha() {
    let d = builders::virtual_dispatch(false);
    let config = AnalysisConfig::default().call_graph_algorithm(CallGraphAlgorithm::Cha);
    let cg = build_call_graph(&d.program, &config).unwrap();
    assert_eq!(cg.num_edges(), 3);

    let report = AnalysisReport::for_call_graph(&d.program, &cg, CallGraphAlgorithm::Cha);
    assert_eq!(report.call_edges.len(), 3);
    assert!(report.points_to.is_empty());
    assert!(report.stats.is_none());
    assert!(report.call_edges.iter().all(|e| e.kind == "VIRTUAL"));
}

#[test]
fn test_dot_export() {
    let d = builders::virtual_dispatch(false);
    let dot = to_dot(&cha(&d.program), &d.program);
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("Main.main()"));
    assert!(dot.contains("C.foo()"));
}
