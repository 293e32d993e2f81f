//! Pointer analysis entry point
//!
//! Wires the configured heap model and worklist order into the solver and
//! wraps the fixpoint in a [`PointerAnalysisResult`].
//!
//! # Example
//! ```text
//! let program = load_program("app.json")?;
//! let result = PointerAnalysis::new(&program, AnalysisConfig::default()).run()?;
//! let x = program.var_by_name(main, "x").unwrap();
//! for obj in result.points_to_objects(x) {
//!     println!("{}", obj.describe(&program));
//! }
//! ```

use tracing::info;

use super::result::PointerAnalysisResult;
use crate::config::{AnalysisConfig, CallGraphAlgorithm};
use crate::errors::Result;
use crate::features::call_graph::{CallGraph, ChaBuilder};
use crate::features::class_hierarchy::ClassHierarchy;
use crate::features::points_to::infrastructure::{create_heap_model, Solver};
use crate::features::program::Program;

pub struct PointerAnalysis<'p> {
    program: &'p Program,
    config: AnalysisConfig,
}

impl<'p> PointerAnalysis<'p> {
    pub fn new(program: &'p Program, config: AnalysisConfig) -> Self {
        Self { program, config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Solve to fixpoint from the program's entry method
    pub fn run(&self) -> Result<PointerAnalysisResult> {
        self.config.validate()?;

        let hierarchy = ClassHierarchy::new(self.program);
        let solver = Solver::new(
            self.program,
            &hierarchy,
            create_heap_model(self.config.heap_model),
            self.config.worklist_order,
        );
        let result = PointerAnalysisResult::from_output(solver.solve()?);

        if self.config.log_statistics {
            let stats = result.stats();
            info!(
                iterations = stats.iterations,
                propagated_objects = stats.propagated_objects,
                pointers = stats.pointers,
                pfg_edges = stats.pfg_edges,
                objects = stats.objects,
                reachable_methods = stats.reachable_methods,
                call_edges = stats.call_edges,
                unsupported_statements = stats.unsupported_statements,
                unresolved_dispatches = stats.unresolved_dispatches,
                duration_ms = stats.duration_ms,
                "pta statistics"
            );
        }
        Ok(result)
    }
}

/// Call graph by the configured algorithm
pub fn build_call_graph(program: &Program, config: &AnalysisConfig) -> Result<CallGraph> {
    match config.call_graph_algorithm {
        CallGraphAlgorithm::Pta => {
            let result = PointerAnalysis::new(program, config.clone()).run()?;
            Ok(result.call_graph().clone())
        }
        CallGraphAlgorithm::Cha => {
            config.validate()?;
            let hierarchy = ClassHierarchy::new(program);
            ChaBuilder::new(&hierarchy).build()
        }
    }
}
