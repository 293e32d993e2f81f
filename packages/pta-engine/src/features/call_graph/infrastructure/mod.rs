//! Call graph construction and export
//!
//! - **ChaBuilder**: class hierarchy analysis from the entry method
//! - **export**: petgraph conversion and Graphviz rendering

pub mod cha;
pub mod export;

pub use cha::ChaBuilder;
pub use export::{to_dot, to_petgraph};
