//! Domain models for points-to analysis

pub mod abstract_object;
pub mod pointer;
pub mod pointer_flow_graph;
pub mod points_to_set;
pub mod work_list;

pub use abstract_object::AbstractObject;
pub use pointer::{Pointer, PointerKind};
pub use pointer_flow_graph::PointerFlowGraph;
pub use points_to_set::PointsToSet;
pub use work_list::{Entry, WorkList, WorklistOrder};
