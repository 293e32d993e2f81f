//! Shared models

pub mod ids;

pub use ids::{AllocSite, CallSite, ClassId, FieldId, MethodId, ObjId, PointerId, StmtRef, VarId};
