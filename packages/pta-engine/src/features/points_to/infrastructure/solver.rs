//! Andersen-style Points-to Solver with on-the-fly call graph
//!
//! Inclusion-based, context-insensitive, flow-insensitive. Two processes feed
//! one worklist until neither has anything left to add:
//! - Reachability: a method that becomes reachable has its statements turned
//!   into seeds and PFG edges (allocations, copies, static fields, static
//!   calls). Instance field, array and instance call statements are indexed
//!   by their base variable.
//! - Propagation: when a variable's points-to set grows by a delta, each new
//!   object is pushed through the indexed statements of that variable. For
//!   calls this means dispatch, which may add call edges and make more
//!   methods reachable.
//!
//! # Complexity
//! - Each object crosses each PFG edge at most once (delta propagation)
//! - The universe of pointers, objects and edges is bounded by the program's
//!   allocation sites, fields, variables and call sites
//!
//! # References
//! - Andersen, L. O. "Program Analysis and Specialization for C" (PhD 1994)
//! - Lhoták & Hendren "Scaling Java Points-to Analysis using Spark" (CC 2003)

use std::collections::VecDeque;
use std::time::Instant;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::errors::{PtaError, Result};
use crate::features::call_graph::{CallGraph, Edge};
use crate::features::class_hierarchy::ClassHierarchy;
use crate::features::points_to::domain::{
    PointerFlowGraph, PointerKind, PointsToSet, WorkList, WorklistOrder,
};
use crate::features::points_to::ports::HeapModel;
use crate::features::program::{CallKind, InvokeExpr, Program, Stmt};
use crate::shared::models::{CallSite, FieldId, MethodId, ObjId, PointerId, StmtRef, VarId};

/// Statistics for one solver run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverStats {
    /// Worklist entries processed
    pub iterations: usize,

    /// Objects added to points-to sets, summed over all pointers
    pub propagated_objects: usize,

    pub pointers: usize,
    pub pfg_edges: usize,
    pub objects: usize,
    pub reachable_methods: usize,
    pub call_edges: usize,

    /// Statements skipped as no-op constraints
    pub unsupported_statements: usize,

    /// (receiver object, call site) pairs with no dispatch target
    pub unresolved_dispatches: usize,

    pub duration_ms: f64,
}

/// Statements whose constraints depend on the objects a variable points to
#[derive(Debug, Clone, Default)]
struct VarStmts {
    /// `v.f = rhs`
    store_fields: Vec<(FieldId, VarId)>,
    /// `lhs = v.f`
    load_fields: Vec<(VarId, FieldId)>,
    /// `v[*] = rhs`
    store_arrays: Vec<VarId>,
    /// `lhs = v[*]`
    load_arrays: Vec<VarId>,
    /// calls with `v` as receiver
    invokes: Vec<CallSite>,
}

impl VarStmts {
    fn is_empty(&self) -> bool {
        self.store_fields.is_empty()
            && self.load_fields.is_empty()
            && self.store_arrays.is_empty()
            && self.load_arrays.is_empty()
            && self.invokes.is_empty()
    }

    fn append(&mut self, mut other: VarStmts) {
        self.store_fields.append(&mut other.store_fields);
        self.load_fields.append(&mut other.load_fields);
        self.store_arrays.append(&mut other.store_arrays);
        self.load_arrays.append(&mut other.load_arrays);
        self.invokes.append(&mut other.invokes);
    }
}

/// Everything the solver owned, handed back once the fixpoint is reached
pub struct SolverOutput {
    pub pfg: PointerFlowGraph,
    pub call_graph: CallGraph,
    pub heap: Box<dyn HeapModel>,
    pub stats: SolverStats,
}

pub struct Solver<'a> {
    program: &'a Program,
    hierarchy: &'a ClassHierarchy<'a>,
    heap: Box<dyn HeapModel>,
    pfg: PointerFlowGraph,
    call_graph: CallGraph,
    work_list: WorkList,
    var_stmts: FxHashMap<VarId, VarStmts>,
    pending_methods: VecDeque<MethodId>,
    stats: SolverStats,
    started: Option<Instant>,
}

impl<'a> Solver<'a> {
    pub fn new(
        program: &'a Program,
        hierarchy: &'a ClassHierarchy<'a>,
        heap: Box<dyn HeapModel>,
        order: WorklistOrder,
    ) -> Self {
        Self {
            program,
            hierarchy,
            heap,
            pfg: PointerFlowGraph::new(),
            call_graph: CallGraph::new(),
            work_list: WorkList::new(order),
            var_stmts: FxHashMap::default(),
            pending_methods: VecDeque::new(),
            stats: SolverStats::default(),
            started: None,
        }
    }

    /// Run to fixpoint from the program's entry method
    pub fn solve(mut self) -> Result<SolverOutput> {
        self.initialize()?;
        self.analyze()?;
        Ok(self.finish())
    }

    /// Seed the analysis: the entry method becomes reachable
    pub fn initialize(&mut self) -> Result<()> {
        let entry = self.program.entry_method().ok_or(PtaError::NoEntryMethod)?;
        self.started = Some(Instant::now());
        info!(
            "pta: solving from {} (heap={}, order={})",
            self.program.method_signature(entry),
            self.heap.name(),
            self.work_list.order()
        );
        self.call_graph.add_entry_method(entry);
        self.add_reachable(entry)
    }

    /// Drain the worklist
    pub fn analyze(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    /// Process one worklist entry; false once the worklist is empty
    pub fn step(&mut self) -> Result<bool> {
        let Some(entry) = self.work_list.poll_entry() else {
            return Ok(false);
        };
        self.stats.iterations += 1;

        let delta = self.propagate(entry.pointer, &entry.pts);
        if delta.is_empty() {
            return Ok(true);
        }
        if let PointerKind::Var { var } = self.pfg.kind_of(entry.pointer) {
            self.process_var_delta(var, &delta)?;
        }
        Ok(true)
    }

    pub fn pointer_flow_graph(&self) -> &PointerFlowGraph {
        &self.pfg
    }

    pub fn call_graph(&self) -> &CallGraph {
        &self.call_graph
    }

    pub fn heap(&self) -> &dyn HeapModel {
        self.heap.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.work_list.is_empty()
    }

    /// Hand back the analysis state with final statistics filled in
    pub fn finish(mut self) -> SolverOutput {
        self.stats.pointers = self.pfg.num_pointers();
        self.stats.pfg_edges = self.pfg.num_edges();
        self.stats.objects = self.heap.objects().len();
        self.stats.reachable_methods = self.call_graph.num_reachable_methods();
        self.stats.call_edges = self.call_graph.num_edges();
        self.stats.duration_ms = self
            .started
            .map(|t| t.elapsed().as_secs_f64() * 1000.0)
            .unwrap_or_default();

        info!(
            "pta: fixpoint after {} iterations: {} reachable methods, {} call edges, {} pointers, {} objects ({:.2}ms)",
            self.stats.iterations,
            self.stats.reachable_methods,
            self.stats.call_edges,
            self.stats.pointers,
            self.stats.objects,
            self.stats.duration_ms
        );

        SolverOutput {
            pfg: self.pfg,
            call_graph: self.call_graph,
            heap: self.heap,
            stats: self.stats,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Reachability
    // ═══════════════════════════════════════════════════════════════════════

    /// Mark `method` reachable and generate its constraints. Static callees
    /// found along the way are queued and handled in the same call.
    fn add_reachable(&mut self, method: MethodId) -> Result<()> {
        self.pending_methods.push_back(method);
        while let Some(m) = self.pending_methods.pop_front() {
            if !self.call_graph.add_reachable_method(m) {
                continue;
            }
            debug!("pta: reachable {}", self.program.method_signature(m));
            self.generate_constraints(m)?;
        }
        Ok(())
    }

    fn generate_constraints(&mut self, method: MethodId) -> Result<()> {
        let program = self.program;
        for (index, stmt) in program.method(method).body.iter().enumerate() {
            let site = StmtRef::new(method, index);
            match stmt {
                Stmt::Allocate { lhs, ty } => {
                    let obj = self.heap.obj(site, ty);
                    let ptr = self.pfg.var_pointer(*lhs);
                    self.work_list.add_entry(ptr, PointsToSet::singleton(obj));
                }
                Stmt::Copy { lhs, rhs } => {
                    let (source, target) = (self.pfg.var_pointer(*rhs), self.pfg.var_pointer(*lhs));
                    self.add_pfg_edge(source, target);
                }
                Stmt::StoreStaticField { field, rhs } => {
                    let field = self.hierarchy.resolve_field(field)?;
                    let source = self.pfg.var_pointer(*rhs);
                    let target = self.pfg.static_field_pointer(field);
                    self.add_pfg_edge(source, target);
                }
                Stmt::LoadStaticField { lhs, field } => {
                    let field = self.hierarchy.resolve_field(field)?;
                    let source = self.pfg.static_field_pointer(field);
                    let target = self.pfg.var_pointer(*lhs);
                    self.add_pfg_edge(source, target);
                }
                Stmt::StoreInstanceField { base, field, rhs } => {
                    let field = self.hierarchy.resolve_field(field)?;
                    self.stmts_of(*base).store_fields.push((field, *rhs));
                }
                Stmt::LoadInstanceField { lhs, base, field } => {
                    let field = self.hierarchy.resolve_field(field)?;
                    self.stmts_of(*base).load_fields.push((*lhs, field));
                }
                Stmt::StoreArrayElement { base, rhs } => {
                    self.stmts_of(*base).store_arrays.push(*rhs);
                }
                Stmt::LoadArrayElement { lhs, base } => {
                    self.stmts_of(*base).load_arrays.push(*lhs);
                }
                Stmt::Invoke { result, call } => {
                    self.index_invoke(site, *result, call)?;
                }
                Stmt::Unsupported { description } => {
                    self.stats.unsupported_statements += 1;
                    warn!(
                        "pta: skipping unsupported statement at {}: {}",
                        program.site_signature(site),
                        description
                    );
                }
            }
        }
        Ok(())
    }

    fn index_invoke(&mut self, site: CallSite, result: Option<VarId>, call: &InvokeExpr) -> Result<()> {
        let resolved = self.hierarchy.resolve_method(&call.method)?;

        match (call.kind, call.receiver) {
            (CallKind::Static, _) if !self.program.method(resolved).is_static => {
                self.stats.unsupported_statements += 1;
                warn!(
                    "pta: static call at {} targets instance method {}, skipped",
                    self.program.site_signature(site),
                    self.program.method_signature(resolved)
                );
            }
            (CallKind::Static, _) => {
                let edge = Edge::new(CallKind::Static, site, resolved);
                if self.call_graph.add_edge(edge) {
                    debug!(
                        "pta: call edge {} -> {} [STATIC]",
                        self.program.site_signature(site),
                        self.program.method_signature(resolved)
                    );
                    self.pending_methods.push_back(resolved);
                    self.bind_call(site, result, call, resolved);
                }
            }
            (_, Some(receiver)) => {
                self.stmts_of(receiver).invokes.push(site);
            }
            (kind, None) => {
                self.stats.unsupported_statements += 1;
                warn!(
                    "pta: {} call at {} has no receiver, skipped",
                    kind,
                    self.program.site_signature(site)
                );
            }
        }
        Ok(())
    }

    fn stmts_of(&mut self, var: VarId) -> &mut VarStmts {
        self.var_stmts.entry(var).or_default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Propagation
    // ═══════════════════════════════════════════════════════════════════════

    /// Merge `pts` into `pointer`; the part that was new is forwarded to
    /// every successor and returned
    fn propagate(&mut self, pointer: PointerId, pts: &PointsToSet) -> PointsToSet {
        let delta = pts.difference(self.pfg.points_to(pointer));
        if delta.is_empty() {
            return delta;
        }
        trace!("pta: {} += {} objects", pointer, delta.len());

        self.pfg.union_into(pointer, &delta);
        self.stats.propagated_objects += delta.len();
        for &succ in self.pfg.succs_of(pointer) {
            self.work_list.add_entry(succ, delta.clone());
        }
        delta
    }

    /// New edges immediately carry whatever the source already holds
    fn add_pfg_edge(&mut self, source: PointerId, target: PointerId) {
        if self.pfg.add_edge(source, target) {
            let pts = self.pfg.points_to(source);
            if !pts.is_empty() {
                self.work_list.add_entry(target, pts.clone());
            }
        }
    }

    /// The statements of `var` are taken out while they run and put back
    /// afterwards, keeping anything indexed for `var` in the meantime
    fn process_var_delta(&mut self, var: VarId, delta: &PointsToSet) -> Result<()> {
        let stmts = match self.var_stmts.get_mut(&var) {
            Some(slot) if !slot.is_empty() => std::mem::take(slot),
            _ => return Ok(()),
        };

        let result = self.apply_var_stmts(&stmts, delta);

        let slot = self.var_stmts.entry(var).or_default();
        let added = std::mem::replace(slot, stmts);
        slot.append(added);
        result
    }

    fn apply_var_stmts(&mut self, stmts: &VarStmts, delta: &PointsToSet) -> Result<()> {
        for obj in delta {
            for &(field, rhs) in &stmts.store_fields {
                let source = self.pfg.var_pointer(rhs);
                let target = self.pfg.instance_field_pointer(obj, field);
                self.add_pfg_edge(source, target);
            }
            for &(lhs, field) in &stmts.load_fields {
                let source = self.pfg.instance_field_pointer(obj, field);
                let target = self.pfg.var_pointer(lhs);
                self.add_pfg_edge(source, target);
            }
            for &rhs in &stmts.store_arrays {
                let source = self.pfg.var_pointer(rhs);
                let target = self.pfg.array_index_pointer(obj);
                self.add_pfg_edge(source, target);
            }
            for &lhs in &stmts.load_arrays {
                let source = self.pfg.array_index_pointer(obj);
                let target = self.pfg.var_pointer(lhs);
                self.add_pfg_edge(source, target);
            }
            for &site in &stmts.invokes {
                self.process_call(obj, site)?;
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Calls
    // ═══════════════════════════════════════════════════════════════════════

    /// Dispatch `site` on receiver object `obj`
    fn process_call(&mut self, obj: ObjId, site: CallSite) -> Result<()> {
        let program = self.program;
        let Some((result, call)) = program.stmt(site).and_then(Stmt::as_invoke) else {
            return Ok(());
        };

        let sig = &call.method.subsignature;
        let callee = match call.kind {
            CallKind::Static => return Ok(()),
            CallKind::Special => self.hierarchy.dispatch(call.method.class, sig),
            CallKind::Virtual | CallKind::Interface => self
                .heap
                .object(obj)
                .ty()
                .and_then(|ty| self.hierarchy.dispatch_on_type(ty, sig)),
        };
        let Some(callee) = callee else {
            self.stats.unresolved_dispatches += 1;
            warn!(
                "pta: no target for {} on {} at {}",
                sig,
                self.heap.object(obj).describe(program),
                program.site_signature(site)
            );
            return Ok(());
        };

        if let Some(this) = program.method(callee).this {
            let this_ptr = self.pfg.var_pointer(this);
            self.work_list.add_entry(this_ptr, PointsToSet::singleton(obj));
        }

        if self.call_graph.add_edge(Edge::new(call.kind, site, callee)) {
            debug!(
                "pta: call edge {} -> {} [{}]",
                program.site_signature(site),
                program.method_signature(callee),
                call.kind
            );
            self.add_reachable(callee)?;
            self.bind_call(site, result, call, callee);
        }
        Ok(())
    }

    /// Arguments flow to parameters, every return variable flows to the result
    fn bind_call(&mut self, site: CallSite, result: Option<VarId>, call: &InvokeExpr, callee: MethodId) {
        let program = self.program;
        let callee_def = program.method(callee);

        if call.args.len() != callee_def.params.len() {
            warn!(
                "pta: {} passes {} arguments to {} which takes {}",
                program.site_signature(site),
                call.args.len(),
                program.method_signature(callee),
                callee_def.params.len()
            );
        }
        for (&arg, &param) in call.args.iter().zip(&callee_def.params) {
            let (source, target) = (self.pfg.var_pointer(arg), self.pfg.var_pointer(param));
            self.add_pfg_edge(source, target);
        }

        if let Some(result) = result {
            let target = self.pfg.var_pointer(result);
            for &ret in &callee_def.return_vars {
                let source = self.pfg.var_pointer(ret);
                self.add_pfg_edge(source, target);
            }
        }
    }
}
