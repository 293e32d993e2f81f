//! # Points-to Analysis Module
//!
//! Context-insensitive, inclusion-based (Andersen) pointer analysis for the
//! program IR, with the call graph built on the fly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PointerAnalysis                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Solver                                                     │
//! │   ├─ reachability: new method → seeds + PFG edges           │
//! │   └─ propagation: var delta → field/array edges, dispatch   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PointerFlowGraph │ WorkList │ HeapModel │ CallGraph        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```text
//! let result = PointerAnalysis::new(&program, AnalysisConfig::default()).run()?;
//! assert!(result.may_alias(a, b));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{
    build_call_graph, AnalysisReport, CallEdgeReport, PointerAnalysis, PointerAnalysisResult,
};
pub use domain::{
    AbstractObject, Pointer, PointerFlowGraph, PointerKind, PointsToSet, WorkList, WorklistOrder,
};
pub use infrastructure::{
    create_heap_model, AllocationSiteHeapModel, Solver, SolverOutput, SolverStats,
    TypeBasedHeapModel,
};
pub use ports::HeapModel;
