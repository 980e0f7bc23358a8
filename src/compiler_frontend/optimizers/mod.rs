//! # Optimization Pipeline
//!
//! Runs the three tree rewrites in their fixed order:
//! constant folding, then dead-code elimination, then loop unrolling.
//!
//! Folding goes first so conditions like `1 - 1` are literals by the time dead-code
//! elimination looks at them. Dead-code elimination goes before unrolling so a branch that
//! is never taken isn't cloned once per iteration.
//!
//! Every pass takes ownership of the tree and hands back its replacement.
//! Nothing is rewritten unless it can be proven safe, so a construct a pass doesn't
//! recognise is returned untouched.

pub mod constant_folding;
pub mod dead_code_elimination;
pub mod loop_unrolling;

#[cfg(test)]
mod tests;

use crate::compiler_frontend::ast::ast_nodes::Link;
use crate::{ast_log, timer_log};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Instant;

/// Each unrolled copy adds one level to the sequence spine, so the default keeps trees
/// shallow enough for the recursive passes and serializers.
pub const DEFAULT_MAX_UNROLL_ITERATIONS: u64 = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerSettings {
    /// Loops with more iterations than this are left as loops.
    /// `None` unrolls every loop with a known range.
    pub max_unroll_iterations: Option<u64>,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        OptimizerSettings {
            max_unroll_iterations: Some(DEFAULT_MAX_UNROLL_ITERATIONS),
        }
    }
}

/// Counts of the rewrites made during one run of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptimizationReport {
    pub folded_expressions: usize,
    pub eliminated_branches: usize,
    pub inlined_branches: usize,
    pub dropped_unreachable: usize,
    pub unrolled_loops: usize,
    pub unrolled_iterations: u64,
}

impl OptimizationReport {
    pub fn total_rewrites(&self) -> usize {
        self.folded_expressions
            + self.eliminated_branches
            + self.inlined_branches
            + self.dropped_unreachable
            + self.unrolled_loops
    }

    pub fn merge(&mut self, other: &OptimizationReport) {
        self.folded_expressions += other.folded_expressions;
        self.eliminated_branches += other.eliminated_branches;
        self.inlined_branches += other.inlined_branches;
        self.dropped_unreachable += other.dropped_unreachable;
        self.unrolled_loops += other.unrolled_loops;
        self.unrolled_iterations += other.unrolled_iterations;
    }
}

impl Display for OptimizationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} folded, {} branches removed, {} branches inlined, {} unreachable dropped, {} loops unrolled ({} iterations)",
            self.folded_expressions,
            self.eliminated_branches,
            self.inlined_branches,
            self.dropped_unreachable,
            self.unrolled_loops,
            self.unrolled_iterations
        )
    }
}

/// Runs the whole pipeline with the default settings.
pub fn optimize(tree: Link) -> Link {
    optimize_with(tree, &OptimizerSettings::default()).0
}

pub fn optimize_with(tree: Link, settings: &OptimizerSettings) -> (Link, OptimizationReport) {
    let time = Instant::now();
    let mut report = OptimizationReport::default();

    let tree = constant_folding::fold_tree(tree, &mut report);
    timer_log!(time, "Constants folded in: ");

    let tree = dead_code_elimination::eliminate_tree(tree, &mut report);
    timer_log!(time, "Dead code eliminated in: ");

    let tree = loop_unrolling::unroll_tree(tree, settings, &mut report);
    timer_log!(time, "Loops unrolled in: ");

    ast_log!("Optimizer finished: ", report.to_string());

    (tree, report)
}
