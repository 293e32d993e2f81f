//! Class Hierarchy Analysis call graph builder
//!
//! Resolves every call site from the declared types alone, so the result
//! over-approximates the pointer-analysis call graph. Useful as a baseline
//! and as a cheap fallback for large programs.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info};

use crate::errors::{PtaError, Result};
use crate::features::call_graph::domain::{CallGraph, Edge};
use crate::features::class_hierarchy::ClassHierarchy;
use crate::features::program::{CallKind, Program, Stmt};
use crate::shared::models::{CallSite, MethodId};

pub struct ChaBuilder<'h, 'p> {
    program: &'p Program,
    hierarchy: &'h ClassHierarchy<'p>,
}

impl<'h, 'p> ChaBuilder<'h, 'p> {
    pub fn new(hierarchy: &'h ClassHierarchy<'p>) -> Self {
        Self {
            program: hierarchy.program(),
            hierarchy,
        }
    }

    /// Build from the program's entry method
    pub fn build(&self) -> Result<CallGraph> {
        let entry = self.program.entry_method().ok_or(PtaError::NoEntryMethod)?;
        self.build_from(entry)
    }

    pub fn build_from(&self, entry: MethodId) -> Result<CallGraph> {
        let start = Instant::now();
        let mut call_graph = CallGraph::new();
        call_graph.add_entry_method(entry);

        let mut work_list = VecDeque::from([entry]);
        while let Some(method) = work_list.pop_front() {
            if !call_graph.add_reachable_method(method) {
                continue;
            }
            debug!("cha: reachable {}", self.program.method_signature(method));

            for call_site in self.program.call_sites_in(method) {
                let kind = match self.program.stmt(call_site) {
                    Some(Stmt::Invoke { call, .. }) => call.kind,
                    _ => continue,
                };
                for callee in self.resolve(call_site)? {
                    call_graph.add_edge(Edge::new(kind, call_site, callee));
                    work_list.push_back(callee);
                }
            }
        }

        info!(
            "cha: {} reachable methods, {} edges in {:.2}ms",
            call_graph.num_reachable_methods(),
            call_graph.num_edges(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(call_graph)
    }

    /// Possible targets of a call site, in hierarchy order without duplicates
    pub fn resolve(&self, call_site: CallSite) -> Result<Vec<MethodId>> {
        let call = match self.program.stmt(call_site) {
            Some(Stmt::Invoke { call, .. }) => call,
            _ => return Ok(Vec::new()),
        };
        let declared = call.method.class;
        let sig = &call.method.subsignature;

        // The reference itself must name a real method
        let resolved = self.hierarchy.resolve_method(&call.method)?;

        let mut targets = Vec::new();
        match call.kind {
            CallKind::Static => targets.push(resolved),
            CallKind::Special => targets.extend(self.hierarchy.dispatch(declared, sig)),
            CallKind::Virtual | CallKind::Interface => {
                for class in self.hierarchy.subtypes_of(declared) {
                    if let Some(target) = self.hierarchy.dispatch(class, sig) {
                        if !targets.contains(&target) {
                            targets.push(target);
                        }
                    }
                }
            }
        }
        Ok(targets)
    }
}
