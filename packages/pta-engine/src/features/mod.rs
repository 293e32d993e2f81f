//! Feature modules, leaves first

pub mod program;
pub mod class_hierarchy;
pub mod call_graph;
pub mod points_to;
