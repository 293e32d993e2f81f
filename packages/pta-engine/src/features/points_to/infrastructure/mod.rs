//! Infrastructure implementations for points-to analysis

pub mod heap_model;
pub mod solver;

pub use heap_model::{create_heap_model, AllocationSiteHeapModel, TypeBasedHeapModel};
pub use solver::{Solver, SolverOutput, SolverStats};
