//! Pointers
//!
//! Four kinds of abstract storage hold references:
//! - `Var(v)`: a local variable or parameter
//! - `InstanceField(o, f)`: field `f` of abstract object `o`
//! - `StaticField(f)`: a class-level field
//! - `ArrayIndex(o)`: all elements of array object `o`, merged
//!
//! Each kind is hash-consed by the pointer flow graph so equal kinds always
//! map to the same [`PointerId`](crate::shared::models::PointerId).

use serde::{Deserialize, Serialize};

use super::points_to_set::PointsToSet;
use crate::features::program::Program;
use crate::shared::models::{FieldId, ObjId, PointerId, VarId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerKind {
    Var { var: VarId },
    InstanceField { obj: ObjId, field: FieldId },
    StaticField { field: FieldId },
    ArrayIndex { obj: ObjId },
}

impl PointerKind {
    pub fn as_var(&self) -> Option<VarId> {
        match self {
            PointerKind::Var { var } => Some(*var),
            _ => None,
        }
    }

    /// Base object for heap-resident pointers
    pub fn base_object(&self) -> Option<ObjId> {
        match self {
            PointerKind::InstanceField { obj, .. } | PointerKind::ArrayIndex { obj } => Some(*obj),
            _ => None,
        }
    }

    pub fn describe(&self, program: &Program) -> String {
        match self {
            PointerKind::Var { var } => program.var_signature(*var),
            PointerKind::InstanceField { obj, field } => {
                format!("{}.{}", obj, program.field(*field).name)
            }
            PointerKind::StaticField { field } => program.field_signature(*field),
            PointerKind::ArrayIndex { obj } => format!("{}[*]", obj),
        }
    }
}

/// A node of the pointer flow graph
#[derive(Debug, Clone)]
pub struct Pointer {
    pub id: PointerId,
    pub kind: PointerKind,

    /// Grows monotonically during solving
    pub pts: PointsToSet,

    /// Outgoing flow edges, deduplicated, in insertion order
    pub succs: Vec<PointerId>,
}

impl Pointer {
    pub fn new(id: PointerId, kind: PointerKind) -> Self {
        Self {
            id,
            kind,
            pts: PointsToSet::new(),
            succs: Vec::new(),
        }
    }
}
