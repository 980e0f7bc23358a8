//! # Loop Unrolling
//!
//! Replaces a counted loop of the form
//!
//! ```text
//! for (int i = START; i < BOUND; i++) BODY
//! ```
//!
//! with `BOUND - START` independent copies of `BODY`, chained into `Sequence` nodes in
//! iteration order. A loop that never runs disappears.
//!
//! Loops are unrolled from the inside out: the parts of a loop are processed before the loop
//! itself is considered. The copies this pass produces are not folded or unrolled again,
//! that takes another run of the pipeline.
//!
//! Anything that doesn't match the pattern exactly is left alone: a missing part, a start or
//! bound that isn't an integer literal, a comparison other than `<`, or an update other than `++`.

use crate::compiler_frontend::ast::ast_nodes::{Link, Node};
use crate::compiler_frontend::ast::operators::{BinaryOperator, UnaryOperator};
use crate::compiler_frontend::optimizers::{OptimizationReport, OptimizerSettings};
use crate::unroll_log;

/// A loop whose range is known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountedLoop {
    pub start: i64,
    pub bound: i64,
}

impl CountedLoop {
    pub fn trip_count(&self) -> u64 {
        if self.start < self.bound {
            self.bound.abs_diff(self.start)
        } else {
            0
        }
    }
}

pub fn unroll_loops(tree: Link) -> Link {
    unroll_tree(
        tree,
        &OptimizerSettings::default(),
        &mut OptimizationReport::default(),
    )
}

pub(crate) fn unroll_tree(
    tree: Link,
    settings: &OptimizerSettings,
    report: &mut OptimizationReport,
) -> Link {
    tree.and_then(|node| unroll_node(node, settings, report))
}

fn unroll_node(
    mut node: Box<Node>,
    settings: &OptimizerSettings,
    report: &mut OptimizationReport,
) -> Link {
    node.rewrite_links(|link| unroll_tree(link, settings, report));

    let Some((counted, body)) = decode_counted_loop(&node) else {
        return Some(node);
    };

    let trip_count = counted.trip_count();
    if let Some(limit) = settings.max_unroll_iterations {
        if trip_count > limit {
            unroll_log!(Yellow "Loop with ", Yellow trip_count, Yellow " iterations is over the unroll limit");
            return Some(node);
        }
    }

    unroll_log!(Green "Unrolling loop ", Green counted.start, Green "..", Green counted.bound);
    report.unrolled_loops += 1;
    report.unrolled_iterations += trip_count;

    // Every iteration gets its own copy; the original loop is released with `node`
    Node::sequence_from((0..trip_count).map(|_| Box::new(body.clone())))
}

/// Recognises `for (decl = START; x < BOUND; x++) BODY` and returns its range and body.
pub fn decode_counted_loop(node: &Node) -> Option<(CountedLoop, &Node)> {
    let Node::For {
        init: Some(init),
        condition: Some(condition),
        update: Some(update),
        body: Some(body),
    } = node
    else {
        return None;
    };

    let Node::Declaration {
        initializer: Some(start),
        ..
    } = init.as_ref()
    else {
        return None;
    };

    let Node::BinaryOp {
        operator: BinaryOperator::LessThan,
        right: Some(bound),
        ..
    } = condition.as_ref()
    else {
        return None;
    };

    // Only a unit increment is understood
    if !matches!(
        update.as_ref(),
        Node::UnaryOp {
            operator: UnaryOperator::Increment,
            ..
        }
    ) {
        return None;
    }

    let counted = CountedLoop {
        start: start.as_int_literal()?,
        bound: bound.as_int_literal()?,
    };

    Some((counted, body.as_ref()))
}
