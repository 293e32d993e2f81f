//! Pointer analysis result
//!
//! Read-only fact base produced by a completed run: the final pointer flow
//! graph, the heap objects and the call graph. Downstream analyses query it
//! by handle; [`PointerAnalysisResult::report`] renders it by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::CallGraphAlgorithm;
use crate::features::call_graph::CallGraph;
use crate::features::points_to::domain::{
    AbstractObject, PointerFlowGraph, PointerKind, PointsToSet,
};
use crate::features::points_to::infrastructure::{SolverOutput, SolverStats};
use crate::features::program::Program;
use crate::shared::models::{CallSite, FieldId, MethodId, ObjId, VarId};

static EMPTY: PointsToSet = PointsToSet::new();

pub struct PointerAnalysisResult {
    pfg: PointerFlowGraph,
    call_graph: CallGraph,
    objects: Vec<AbstractObject>,
    heap_model: &'static str,
    stats: SolverStats,
}

impl PointerAnalysisResult {
    pub fn from_output(output: SolverOutput) -> Self {
        Self {
            objects: output.heap.objects().to_vec(),
            heap_model: output.heap.name(),
            pfg: output.pfg,
            call_graph: output.call_graph,
            stats: output.stats,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Points-to queries
    // ═══════════════════════════════════════════════════════════════════════

    /// Objects variable `var` may point to; empty for variables the analysis
    /// never reached
    pub fn points_to_var(&self, var: VarId) -> &PointsToSet {
        self.points_to_kind(&PointerKind::Var { var })
    }

    pub fn points_to_static_field(&self, field: FieldId) -> &PointsToSet {
        self.points_to_kind(&PointerKind::StaticField { field })
    }

    pub fn points_to_instance_field(&self, obj: ObjId, field: FieldId) -> &PointsToSet {
        self.points_to_kind(&PointerKind::InstanceField { obj, field })
    }

    pub fn points_to_array(&self, obj: ObjId) -> &PointsToSet {
        self.points_to_kind(&PointerKind::ArrayIndex { obj })
    }

    fn points_to_kind(&self, kind: &PointerKind) -> &PointsToSet {
        self.pfg
            .get(kind)
            .map(|p| self.pfg.points_to(p))
            .unwrap_or(&EMPTY)
    }

    pub fn points_to_objects(&self, var: VarId) -> Vec<&AbstractObject> {
        self.points_to_var(var)
            .iter()
            .map(|o| &self.objects[o.index()])
            .collect()
    }

    /// True if the two variables share at least one object
    pub fn may_alias(&self, a: VarId, b: VarId) -> bool {
        self.points_to_var(a).intersects(self.points_to_var(b))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Call graph queries
    // ═══════════════════════════════════════════════════════════════════════

    pub fn call_graph(&self) -> &CallGraph {
        &self.call_graph
    }

    pub fn is_reachable(&self, method: MethodId) -> bool {
        self.call_graph.contains(method)
    }

    pub fn callees_of(&self, call_site: CallSite) -> &[MethodId] {
        self.call_graph.callees_of(call_site)
    }

    pub fn callers_of(&self, method: MethodId) -> &[CallSite] {
        self.call_graph.callers_of(method)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Raw state
    // ═══════════════════════════════════════════════════════════════════════

    pub fn pointer_flow_graph(&self) -> &PointerFlowGraph {
        &self.pfg
    }

    pub fn objects(&self) -> &[AbstractObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjId) -> &AbstractObject {
        &self.objects[id.index()]
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn heap_model(&self) -> &'static str {
        self.heap_model
    }

    /// Name-keyed summary for JSON output. Variables with empty sets are
    /// left out; each set is cut at `max_objects`.
    pub fn report(&self, program: &Program, max_objects: usize) -> AnalysisReport {
        let mut points_to = BTreeMap::new();
        for pointer in self.pfg.pointers() {
            let Some(var) = pointer.kind.as_var() else {
                continue;
            };
            if pointer.pts.is_empty() {
                continue;
            }
            let objects = pointer
                .pts
                .iter()
                .take(max_objects)
                .map(|o| self.object(o).describe(program))
                .collect();
            points_to.insert(program.var_signature(var), objects);
        }

        let mut report = AnalysisReport::for_call_graph(program, &self.call_graph, CallGraphAlgorithm::Pta);
        report.heap_model = Some(self.heap_model.to_string());
        report.points_to = points_to;
        report.stats = Some(self.stats.clone());
        report
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallEdgeReport {
    pub kind: String,
    pub call_site: String,
    pub callee: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub algorithm: CallGraphAlgorithm,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heap_model: Option<String>,

    pub reachable_methods: Vec<String>,
    pub call_edges: Vec<CallEdgeReport>,

    /// Variable signature → object descriptions
    pub points_to: BTreeMap<String, Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SolverStats>,
}

impl AnalysisReport {
    /// Call-graph-only report, as produced for CHA runs
    pub fn for_call_graph(program: &Program, call_graph: &CallGraph, algorithm: CallGraphAlgorithm) -> Self {
        let reachable_methods = call_graph
            .sorted_reachable_methods()
            .into_iter()
            .map(|m| program.method_signature(m))
            .collect();
        let call_edges = call_graph
            .sorted_edges()
            .into_iter()
            .map(|e| CallEdgeReport {
                kind: e.kind.to_string(),
                call_site: program.site_signature(e.call_site),
                callee: program.method_signature(e.callee),
            })
            .collect();

        Self {
            algorithm,
            heap_model: None,
            reachable_methods,
            call_edges,
            points_to: BTreeMap::new(),
            stats: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
