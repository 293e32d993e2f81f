//! Application layer for points-to analysis

pub mod analyzer;
pub mod result;

pub use analyzer::{build_call_graph, PointerAnalysis};
pub use result::{AnalysisReport, CallEdgeReport, PointerAnalysisResult};
