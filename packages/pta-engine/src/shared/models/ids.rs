//! Arena handles shared by every feature.

use crate::define_id;

define_id!(
    /// Handle of a class or interface in a [`Program`](crate::features::program::Program).
    ClassId,
    "class#"
);
define_id!(
    /// Handle of a method.
    MethodId,
    "method#"
);
define_id!(
    /// Handle of a field declaration.
    FieldId,
    "field#"
);
define_id!(
    /// Handle of a local variable (parameters, `this` and temporaries included).
    VarId,
    "var#"
);
define_id!(
    /// Handle of an abstract heap object.
    ObjId,
    "obj#"
);
define_id!(
    /// Handle of a pointer node in the pointer flow graph.
    PointerId,
    "ptr#"
);

/// Position of a statement: owning method plus index into its body.
///
/// Doubles as allocation-site and call-site identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct StmtRef {
    pub method: MethodId,
    pub index: u32,
}

impl StmtRef {
    #[inline]
    pub fn new(method: MethodId, index: usize) -> Self {
        Self {
            method,
            index: index as u32,
        }
    }
}

impl std::fmt::Display for StmtRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.method, self.index)
    }
}

/// Allocation sites are statements.
pub type AllocSite = StmtRef;

/// Call sites are statements.
pub type CallSite = StmtRef;
