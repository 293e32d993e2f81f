//! # Call Graph
//!
//! Shared by both call graph algorithms:
//! - the pointer analysis grows it on the fly as receiver objects are found
//! - [`ChaBuilder`] computes it up front from declared types

pub mod domain;
pub mod infrastructure;

pub use domain::{CallGraph, CallKind, Edge};
pub use infrastructure::{to_dot, to_petgraph, ChaBuilder};
