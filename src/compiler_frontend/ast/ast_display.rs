//! AST Display
//!
//! Renders a tree in the indented dump format handed to the printer stage:
//! two spaces per level, one `LABEL (payload)` line per node.
//! Child links are printed one level deeper than their parent.
//! Sibling-chain links (a loop's update and body, the rest of an expression list)
//! are printed at the same level as the node they hang off.

use crate::compiler_frontend::ast::ast_nodes::{Link, Node};
use std::fmt::{Display, Formatter, Result as FmtResult};

pub const ORIGINAL_AST_HEADER: &str = "Original AST:";
pub const OPTIMIZED_AST_HEADER: &str = "Optimized AST:";
const INDENT: &str = "  ";

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_node(f, self, 0)
    }
}

fn write_link(f: &mut Formatter<'_>, link: &Link, indent: usize) -> FmtResult {
    match link {
        Some(node) => write_node(f, node, indent),
        None => Ok(()),
    }
}

fn write_line(f: &mut Formatter<'_>, node: &Node, indent: usize) -> FmtResult {
    for _ in 0..indent {
        f.write_str(INDENT)?;
    }

    f.write_str(node.label())?;
    if let Some(payload) = node.payload() {
        write!(f, " ({})", payload)?;
    }
    f.write_str("\n")
}

fn write_node(f: &mut Formatter<'_>, node: &Node, indent: usize) -> FmtResult {
    if let Node::Sequence { .. } = node {
        return write_sequence(f, node, indent);
    }

    write_line(f, node, indent)?;

    let child_indent = indent + 1;

    match node {
        Node::IntLiteral(_) | Node::StringLiteral(_) | Node::VarRef(_) | Node::TypeName(_) => {
            Ok(())
        }

        Node::Declaration { initializer, .. } => write_link(f, initializer, child_indent),

        Node::BinaryOp { left, right, .. } => {
            write_link(f, left, child_indent)?;
            write_link(f, right, child_indent)
        }

        Node::UnaryOp { operand, .. } => write_link(f, operand, child_indent),
        Node::FunctionCall { arguments, .. } => write_link(f, arguments, child_indent),
        Node::FunctionDef { body, .. } => write_link(f, body, child_indent),

        Node::If {
            condition,
            then_branch,
        } => {
            write_link(f, condition, child_indent)?;
            write_link(f, then_branch, child_indent)
        }

        // Update and body are siblings of the condition, so they share its level
        Node::For {
            init,
            condition,
            update,
            body,
        } => {
            write_link(f, init, child_indent)?;
            write_link(f, condition, child_indent)?;
            write_link(f, update, child_indent)?;
            write_link(f, body, child_indent)
        }

        Node::Return { value } => write_link(f, value, child_indent),

        Node::ExprList { expr, rest } => {
            write_link(f, expr, child_indent)?;
            write_link(f, rest, indent)
        }

        Node::Sequence { .. } => write_sequence(f, node, indent),
    }
}

// Walks the `first` spine of left-nested sequences with an explicit stack.
// The second halves are printed on the way back out, innermost first.
fn write_sequence(f: &mut Formatter<'_>, node: &Node, indent: usize) -> FmtResult {
    let mut second_halves: Vec<(&Link, usize)> = Vec::new();
    let mut current = Some(node);
    let mut depth = indent;

    while let Some(spine_node) = current {
        let Node::Sequence { first, second } = spine_node else {
            write_node(f, spine_node, depth)?;
            break;
        };

        write_line(f, spine_node, depth)?;
        second_halves.push((second, depth + 1));
        depth += 1;
        current = first.as_deref();
    }

    for (second, second_indent) in second_halves.into_iter().rev() {
        write_link(f, second, second_indent)?;
    }

    Ok(())
}

/// Dump of a whole tree. An absent tree renders as nothing.
pub fn dump_tree(tree: &Link) -> String {
    match tree {
        Some(node) => node.to_string(),
        None => String::new(),
    }
}

/// The before/after report written by the driver.
pub fn render_report(original: &Link, optimized: &Link) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        ORIGINAL_AST_HEADER,
        dump_tree(original),
        OPTIMIZED_AST_HEADER,
        dump_tree(optimized)
    )
}
