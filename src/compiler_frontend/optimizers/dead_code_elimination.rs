//! # Dead-Code Elimination
//!
//! Removes code that can never run:
//! - `if (0) { ... }` disappears entirely.
//! - `if (1) { body }` is replaced by its body, which is still processed.
//! - In a `Sequence` whose first statement ends up as a `return`, the second statement is
//!   dropped without being visited.
//!
//! Only literal conditions are inspected, so this pass is safe to run on an unfolded tree.
//! An `if` without a then-branch is left as it is.

use crate::compiler_frontend::ast::ast_nodes::{Link, Node};
use crate::compiler_frontend::optimizers::OptimizationReport;
use crate::dead_code_log;

pub fn eliminate_dead_code(tree: Link) -> Link {
    eliminate_tree(tree, &mut OptimizationReport::default())
}

pub(crate) fn eliminate_tree(tree: Link, report: &mut OptimizationReport) -> Link {
    tree.and_then(|node| eliminate_node(node, report))
}

fn eliminate_node(mut node: Box<Node>, report: &mut OptimizationReport) -> Link {
    match node.as_mut() {
        Node::If {
            condition: Some(condition),
            then_branch: then_branch @ Some(_),
        } if condition.is_int_literal(0) || condition.is_int_literal(1) => {
            if condition.is_int_literal(0) {
                dead_code_log!(Yellow "Removed if (0) block");
                report.eliminated_branches += 1;
                return None;
            }

            dead_code_log!(Yellow "Inlined if (1) block");
            report.inlined_branches += 1;

            // The condition and the if node itself are released once the body is detached
            let body = then_branch.take();
            eliminate_tree(body, report)
        }

        Node::Sequence { first, second } => {
            *first = eliminate_tree(first.take(), report);

            if first.as_deref().is_some_and(Node::is_return) {
                if second.take().is_some() {
                    dead_code_log!(Yellow "Dropped statement after return");
                    report.dropped_unreachable += 1;
                }
            } else {
                *second = eliminate_tree(second.take(), report);
            }

            Some(node)
        }

        _ => {
            node.rewrite_links(|link| eliminate_tree(link, report));
            Some(node)
        }
    }
}
