//! # Constant Folding
//!
//! Replaces a binary operation whose operands are both integer literals with the literal
//! result. Children are folded before their parent, so nested constant subexpressions
//! collapse from the leaves up: `(2 + 3) * 4` becomes `20` in a single pass.
//!
//! Supported operators are `+`, `-`, `*`, truncating `/` and `<` (which yields 0 or 1).
//! Anything else, division by a literal zero, and results that overflow are left unfolded
//! for later stages to deal with.

use crate::compiler_frontend::ast::ast_nodes::{Link, Node};
use crate::compiler_frontend::ast::operators::BinaryOperator;
use crate::compiler_frontend::optimizers::OptimizationReport;
use crate::fold_log;

pub fn fold_constants(tree: Link) -> Link {
    fold_tree(tree, &mut OptimizationReport::default())
}

pub(crate) fn fold_tree(tree: Link, report: &mut OptimizationReport) -> Link {
    tree.map(|node| fold_node(node, report))
}

fn fold_node(mut node: Box<Node>, report: &mut OptimizationReport) -> Box<Node> {
    node.rewrite_links(|link| fold_tree(link, report));

    let folded = match node.as_ref() {
        Node::BinaryOp {
            operator,
            left: Some(left),
            right: Some(right),
        } => match (left.as_int_literal(), right.as_int_literal()) {
            (Some(lhs), Some(rhs)) => evaluate_operator(*operator, lhs, rhs),
            _ => None,
        },
        _ => None,
    };

    match folded {
        Some(result) => {
            fold_log!("Folded ", node.payload().unwrap_or_default(), " to ", result);
            report.folded_expressions += 1;

            // The operator node and both literal operands are released here
            Node::int(result)
        }
        None => node,
    }
}

/// Evaluates `lhs op rhs` for the operators the folder understands.
/// Returns `None` when the expression should be left for runtime.
pub fn evaluate_operator(operator: BinaryOperator, lhs: i64, rhs: i64) -> Option<i64> {
    match operator {
        BinaryOperator::Add => lhs.checked_add(rhs),
        BinaryOperator::Subtract => lhs.checked_sub(rhs),
        BinaryOperator::Multiply => lhs.checked_mul(rhs),

        // None for a zero divisor as well as for MIN / -1
        BinaryOperator::Divide => lhs.checked_div(rhs),

        BinaryOperator::LessThan => Some(i64::from(lhs < rhs)),
        _ => None,
    }
}
