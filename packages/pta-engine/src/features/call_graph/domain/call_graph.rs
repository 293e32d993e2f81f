//! Call Graph
//!
//! Reachable-method set plus call edges labelled by [`CallKind`]. Methods
//! and edges are only ever added; insertion order is kept so reports are
//! stable across runs.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::features::program::CallKind;
use crate::shared::models::{CallSite, MethodId};

/// `call_site → callee`, tagged with the call's kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub kind: CallKind,
    pub call_site: CallSite,
    pub callee: MethodId,
}

impl Edge {
    #[inline]
    pub fn new(kind: CallKind, call_site: CallSite, callee: MethodId) -> Self {
        Self {
            kind,
            call_site,
            callee,
        }
    }

    /// Method containing the call site
    #[inline]
    pub fn caller(&self) -> MethodId {
        self.call_site.method
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    entry_methods: Vec<MethodId>,
    reachable: FxHashSet<MethodId>,
    reachable_order: Vec<MethodId>,
    edges: Vec<Edge>,
    edge_set: FxHashSet<(CallSite, MethodId)>,
    callees_by_site: FxHashMap<CallSite, Vec<MethodId>>,
    callers_by_method: FxHashMap<MethodId, Vec<CallSite>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry_method(&mut self, method: MethodId) {
        if !self.entry_methods.contains(&method) {
            self.entry_methods.push(method);
        }
    }

    pub fn entry_methods(&self) -> &[MethodId] {
        &self.entry_methods
    }

    /// Returns true if the method was not reachable before
    pub fn add_reachable_method(&mut self, method: MethodId) -> bool {
        if self.reachable.insert(method) {
            self.reachable_order.push(method);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, method: MethodId) -> bool {
        self.reachable.contains(&method)
    }

    /// Reachable methods in discovery order
    pub fn reachable_methods(&self) -> &[MethodId] {
        &self.reachable_order
    }

    /// Returns true if the `(call site, callee)` pair is new.
    ///
    /// A pair already present under a different kind is not added again.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if !self.edge_set.insert((edge.call_site, edge.callee)) {
            return false;
        }
        self.edges.push(edge);
        self.callees_by_site
            .entry(edge.call_site)
            .or_default()
            .push(edge.callee);
        self.callers_by_method
            .entry(edge.callee)
            .or_default()
            .push(edge.call_site);
        true
    }

    #[inline]
    pub fn has_edge(&self, call_site: CallSite, callee: MethodId) -> bool {
        self.edge_set.contains(&(call_site, callee))
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_of_kind(&self, kind: CallKind) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    pub fn callees_of(&self, call_site: CallSite) -> &[MethodId] {
        self.callees_by_site
            .get(&call_site)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn callers_of(&self, method: MethodId) -> &[CallSite] {
        self.callers_by_method
            .get(&method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Edges leaving call sites inside `method`
    pub fn edges_out_of(&self, method: MethodId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.caller() == method)
    }

    pub fn num_reachable_methods(&self) -> usize {
        self.reachable_order.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Edge set sorted by (site, callee), for order-independent comparison
    pub fn sorted_edges(&self) -> Vec<Edge> {
        let mut edges = self.edges.clone();
        edges.sort_by_key(|e| (e.call_site, e.callee, e.kind));
        edges
    }

    /// Reachable methods sorted by handle
    pub fn sorted_reachable_methods(&self) -> Vec<MethodId> {
        let mut methods = self.reachable_order.clone();
        methods.sort();
        methods
    }
}
