/*
 * PTA Engine - Andersen Pointer Analysis for Object-Oriented IR
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Arena handles and id macros
 * - features/    : Vertical slices (program → class_hierarchy → call_graph → points_to)
 * - config/      : Presets, builder API, versioned YAML
 *
 * Analysis:
 * - Inclusion-based, context-insensitive, flow-insensitive
 * - Call graph discovered on the fly from receiver points-to sets
 * - CHA call graph as a baseline
 */

// Crate-level lint configuration
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::len_without_is_empty)] // Arena sizes only

#[macro_use]
pub mod shared;

pub mod config;
pub mod errors;
pub mod features;

pub use config::{AnalysisConfig, CallGraphAlgorithm, ConfigError, HeapModelKind, Preset};
pub use errors::{PtaError, Result};
pub use features::call_graph::{to_dot, CallGraph, ChaBuilder, Edge};
pub use features::class_hierarchy::ClassHierarchy;
pub use features::points_to::{
    build_call_graph, AbstractObject, AnalysisReport, PointerAnalysis, PointerAnalysisResult,
    PointsToSet, SolverStats, WorklistOrder,
};
pub use features::program::{
    load_program, CallKind, FieldRef, MethodKind, MethodRef, Program, ProgramBuilder,
    ProgramError, Stmt, Subsignature, TypeRef,
};
pub use shared::models::{ClassId, FieldId, MethodId, ObjId, PointerId, StmtRef, VarId};
