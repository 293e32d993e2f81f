//! Statements
//!
//! The closed set of statement shapes the pointer analysis understands.
//! Anything else a front end cannot lower becomes [`Stmt::Unsupported`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{FieldRef, MethodRef, TypeRef};
use crate::shared::models::VarId;

/// How a call site selects its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    /// Statically bound, no receiver
    Static,
    /// Constructor, private or `super` call: bound to the referenced class
    Special,
    /// Dispatched on the receiver's runtime class
    Virtual,
    /// Dispatched on the receiver's runtime class through an interface
    Interface,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::Static => "STATIC",
            CallKind::Special => "SPECIAL",
            CallKind::Virtual => "VIRTUAL",
            CallKind::Interface => "INTERFACE",
        }
    }

    /// Virtual and interface calls depend on the receiver object
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, CallKind::Virtual | CallKind::Interface)
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of an invocation
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeExpr {
    pub kind: CallKind,
    pub method: MethodRef,
    /// Receiver variable; `None` for static calls
    pub receiver: Option<VarId>,
    pub args: Vec<VarId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `lhs = new T()`
    Allocate { lhs: VarId, ty: TypeRef },
    /// `lhs = rhs`
    Copy { lhs: VarId, rhs: VarId },
    /// `base.field = rhs`
    StoreInstanceField {
        base: VarId,
        field: FieldRef,
        rhs: VarId,
    },
    /// `lhs = base.field`
    LoadInstanceField {
        lhs: VarId,
        base: VarId,
        field: FieldRef,
    },
    /// `T.field = rhs`
    StoreStaticField { field: FieldRef, rhs: VarId },
    /// `lhs = T.field`
    LoadStaticField { lhs: VarId, field: FieldRef },
    /// `base[*] = rhs`
    StoreArrayElement { base: VarId, rhs: VarId },
    /// `lhs = base[*]`
    LoadArrayElement { lhs: VarId, base: VarId },
    /// `[result =] invoke`
    Invoke {
        result: Option<VarId>,
        call: InvokeExpr,
    },
    /// A statement shape the front end could not lower
    Unsupported { description: String },
}

impl Stmt {
    /// Variable defined by this statement, if any
    pub fn def(&self) -> Option<VarId> {
        match self {
            Stmt::Allocate { lhs, .. }
            | Stmt::Copy { lhs, .. }
            | Stmt::LoadInstanceField { lhs, .. }
            | Stmt::LoadStaticField { lhs, .. }
            | Stmt::LoadArrayElement { lhs, .. } => Some(*lhs),
            Stmt::Invoke { result, .. } => *result,
            Stmt::StoreInstanceField { .. }
            | Stmt::StoreStaticField { .. }
            | Stmt::StoreArrayElement { .. }
            | Stmt::Unsupported { .. } => None,
        }
    }

    /// Variables read by this statement
    pub fn uses(&self) -> Vec<VarId> {
        match self {
            Stmt::Allocate { .. } | Stmt::LoadStaticField { .. } | Stmt::Unsupported { .. } => {
                Vec::new()
            }
            Stmt::Copy { rhs, .. } | Stmt::StoreStaticField { rhs, .. } => vec![*rhs],
            Stmt::StoreInstanceField { base, rhs, .. } | Stmt::StoreArrayElement { base, rhs } => {
                vec![*base, *rhs]
            }
            Stmt::LoadInstanceField { base, .. } | Stmt::LoadArrayElement { base, .. } => {
                vec![*base]
            }
            Stmt::Invoke { call, .. } => call.receiver.iter().chain(&call.args).copied().collect(),
        }
    }

    /// Static field accesses and static calls are handled when the method
    /// becomes reachable; everything with a base variable waits for objects.
    pub fn is_static_access(&self) -> bool {
        match self {
            Stmt::StoreStaticField { .. } | Stmt::LoadStaticField { .. } => true,
            Stmt::Invoke { call, .. } => call.kind == CallKind::Static,
            _ => false,
        }
    }

    pub fn as_invoke(&self) -> Option<(Option<VarId>, &InvokeExpr)> {
        match self {
            Stmt::Invoke { result, call } => Some((*result, call)),
            _ => None,
        }
    }
}
