//! Shared test helpers

#![allow(dead_code)]

pub mod builders;

use std::path::PathBuf;

use pta_engine::{MethodId, ObjId, PointerAnalysisResult, Program, VarId};

pub fn var(program: &Program, method: MethodId, name: &str) -> VarId {
    program
        .var_by_name(method, name)
        .unwrap_or_else(|| panic!("no variable {} in {}", name, program.method_signature(method)))
}

/// Points-to set of a named local as a sorted vector
pub fn pts(result: &PointerAnalysisResult, program: &Program, method: MethodId, name: &str) -> Vec<ObjId> {
    result.points_to_var(var(program, method, name)).iter().collect()
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
