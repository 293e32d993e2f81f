//! Pointer Flow Graph (PFG)
//!
//! Nodes are pointers, and an edge `s → t` means every object in `pts(s)`
//! must also be in `pts(t)`. Nodes are hash-consed by [`PointerKind`]: asking
//! twice for the same variable or field slot returns the same handle.
//!
//! # Example
//! ```text
//! x = new A()   // pts(x) = {o1}
//! y = x         // edge x → y
//! z = y         // edge y → z
//! // after propagation: pts(y) = pts(z) = {o1}
//! ```

use rustc_hash::{FxHashMap, FxHashSet};

use super::pointer::{Pointer, PointerKind};
use super::points_to_set::PointsToSet;
use crate::shared::models::{FieldId, ObjId, PointerId, VarId};

#[derive(Debug, Clone, Default)]
pub struct PointerFlowGraph {
    pointers: Vec<Pointer>,
    index: FxHashMap<PointerKind, PointerId>,
    edges: FxHashSet<(PointerId, PointerId)>,
}

impl PointerFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Hash-consed pointer creation
    // ═══════════════════════════════════════════════════════════════════════

    pub fn pointer(&mut self, kind: PointerKind) -> PointerId {
        if let Some(&id) = self.index.get(&kind) {
            return id;
        }
        let id = PointerId::new(self.pointers.len());
        self.pointers.push(Pointer::new(id, kind));
        self.index.insert(kind, id);
        id
    }

    #[inline]
    pub fn var_pointer(&mut self, var: VarId) -> PointerId {
        self.pointer(PointerKind::Var { var })
    }

    #[inline]
    pub fn instance_field_pointer(&mut self, obj: ObjId, field: FieldId) -> PointerId {
        self.pointer(PointerKind::InstanceField { obj, field })
    }

    #[inline]
    pub fn static_field_pointer(&mut self, field: FieldId) -> PointerId {
        self.pointer(PointerKind::StaticField { field })
    }

    #[inline]
    pub fn array_index_pointer(&mut self, obj: ObjId) -> PointerId {
        self.pointer(PointerKind::ArrayIndex { obj })
    }

    /// Existing pointer for `kind`, without creating one
    pub fn get(&self, kind: &PointerKind) -> Option<PointerId> {
        self.index.get(kind).copied()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Nodes and edges
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn node(&self, id: PointerId) -> &Pointer {
        &self.pointers[id.index()]
    }

    #[inline]
    pub fn kind_of(&self, id: PointerId) -> PointerKind {
        self.pointers[id.index()].kind
    }

    /// Returns true if the edge is new
    pub fn add_edge(&mut self, source: PointerId, target: PointerId) -> bool {
        if !self.edges.insert((source, target)) {
            return false;
        }
        self.pointers[source.index()].succs.push(target);
        true
    }

    #[inline]
    pub fn has_edge(&self, source: PointerId, target: PointerId) -> bool {
        self.edges.contains(&(source, target))
    }

    #[inline]
    pub fn succs_of(&self, id: PointerId) -> &[PointerId] {
        &self.pointers[id.index()].succs
    }

    #[inline]
    pub fn points_to(&self, id: PointerId) -> &PointsToSet {
        &self.pointers[id.index()].pts
    }

    /// `pts(id) ∪= objs`; returns true if the set grew
    pub fn union_into(&mut self, id: PointerId, objs: &PointsToSet) -> bool {
        self.pointers[id.index()].pts.union_with(objs)
    }

    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    pub fn num_pointers(&self) -> usize {
        self.pointers.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}
