//! Domain models for the analysed program
//!
//! - Program: arena of classes, methods, fields and variables
//! - Stmt: closed set of statement shapes
//! - TypeRef / MethodRef / FieldRef: symbolic references

pub mod program;
pub mod stmt;
pub mod types;

pub use program::Program;
pub use stmt::{CallKind, InvokeExpr, Stmt};
pub use types::{
    ClassDef, FieldDef, FieldRef, MethodDef, MethodRef, Subsignature, TypeRef, VarDef,
};
