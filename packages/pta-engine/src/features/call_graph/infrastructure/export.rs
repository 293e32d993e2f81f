//! Call graph export to petgraph / Graphviz

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::features::call_graph::domain::CallGraph;
use crate::features::program::{CallKind, Program};
use crate::shared::models::MethodId;

/// Method-level graph: one node per reachable method, one edge per call
/// edge (parallel edges kept when several sites call the same callee)
pub fn to_petgraph(call_graph: &CallGraph, program: &Program) -> DiGraph<String, CallKind> {
    let mut graph = DiGraph::new();
    let mut nodes: FxHashMap<MethodId, NodeIndex> = FxHashMap::default();

    for &method in call_graph.reachable_methods() {
        let idx = graph.add_node(program.method_signature(method));
        nodes.insert(method, idx);
    }

    for edge in call_graph.edges() {
        let (Some(&from), Some(&to)) = (nodes.get(&edge.caller()), nodes.get(&edge.callee)) else {
            continue;
        };
        graph.add_edge(from, to, edge.kind);
    }
    graph
}

/// Graphviz rendering with call kinds as edge labels
pub fn to_dot(call_graph: &CallGraph, program: &Program) -> String {
    let graph = to_petgraph(call_graph, program);
    format!("{}", Dot::new(&graph))
}
