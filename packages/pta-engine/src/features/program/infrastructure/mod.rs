//! Program construction: fluent builder and JSON loader

pub mod builder;
pub mod json_loader;

pub use builder::{MethodBuilder, MethodKind, ProgramBuilder};
pub use json_loader::{load_program, ProgramSpec};
