//! Call graph domain: reachable methods and kind-labelled edges

pub mod call_graph;

pub use crate::features::program::CallKind;
pub use call_graph::{CallGraph, Edge};
