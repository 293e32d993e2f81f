//! # Program IR
//!
//! Arena-based object-oriented IR the pointer analysis runs over:
//! classes with single inheritance and interfaces, methods with an ordered
//! statement list, fields and local variables. References inside statements
//! are symbolic (`MethodRef`, `FieldRef`) and resolved by the class hierarchy.

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::{
    CallKind, ClassDef, FieldDef, FieldRef, InvokeExpr, MethodDef, MethodRef, Program, Stmt,
    Subsignature, TypeRef, VarDef,
};
pub use error::{ProgramError, ProgramResult};
pub use infrastructure::{load_program, MethodBuilder, MethodKind, ProgramBuilder, ProgramSpec};
