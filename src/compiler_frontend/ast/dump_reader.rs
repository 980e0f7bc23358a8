//! Dump Reader
//!
//! Reads the indented dump format back into a tree.
//! The format is lossy: sibling-chain links are printed at the same level as the node they
//! hang off, so they come back as extra children and are re-linked by position here.

use crate::compiler_frontend::ast::ast_display::{OPTIMIZED_AST_HEADER, ORIGINAL_AST_HEADER};
use crate::compiler_frontend::ast::ast_nodes::{Link, Node};
use crate::compiler_frontend::ast::operators::{BinaryOperator, UnaryOperator};
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::{ast_log, return_syntax_error};

const PLAIN_DUMP_HEADER: &str = "AST:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpSection {
    Original,
    Optimized,
}

impl DumpSection {
    fn header(&self) -> &'static str {
        match self {
            DumpSection::Original => ORIGINAL_AST_HEADER,
            DumpSection::Optimized => OPTIMIZED_AST_HEADER,
        }
    }
}

// One line of the dump with the lines nested under it
#[derive(Debug)]
struct OutlineNode {
    label: String,
    payload: Option<String>,
    line_number: usize,
    depth: usize,
    children: Vec<OutlineNode>,
}

/// Parses a plain dump. Returns `None` for an empty dump.
pub fn parse_dump(text: &str) -> Result<Link, CompilerError> {
    parse_lines(text.lines().enumerate().map(|(i, line)| (i + 1, line)))
}

/// Parses one section of a driver report containing `Original AST:` and `Optimized AST:`.
pub fn parse_report_section(text: &str, section: DumpSection) -> Result<Link, CompilerError> {
    let header = section.header();
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .collect();

    let start = match lines.iter().position(|(_, line)| line.trim_end() == header) {
        Some(index) => index + 1,
        None => return_syntax_error!(format!("Report has no '{}' section", header), 0),
    };

    let section_lines = lines[start..].iter().copied().take_while(|(_, line)| {
        let line = line.trim_end();
        line != ORIGINAL_AST_HEADER && line != OPTIMIZED_AST_HEADER
    });

    parse_lines(section_lines)
}

fn parse_lines<'a>(lines: impl Iterator<Item = (usize, &'a str)>) -> Result<Link, CompilerError> {
    let mut roots: Vec<OutlineNode> = Vec::new();
    let mut stack: Vec<OutlineNode> = Vec::new();

    for (line_number, line) in lines {
        let line = line.trim_end();
        if line.trim().is_empty() || line == PLAIN_DUMP_HEADER {
            continue;
        }

        let node = parse_line(line, line_number)?;

        // Close every open node at this depth or deeper
        while stack.last().is_some_and(|open| open.depth >= node.depth) {
            close_top(&mut stack, &mut roots);
        }

        let expected_depth = stack.last().map_or(0, |open| open.depth + 1);
        if node.depth != expected_depth {
            return_syntax_error!(
                format!(
                    "Unexpected indentation: expected depth {} or less, found {}",
                    expected_depth, node.depth
                ),
                line_number
            );
        }

        stack.push(node);
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    let first_line = roots.first().map_or(0, |root| root.line_number);
    let mut linked = convert_all(roots)?;

    ast_log!("Read ", linked.len(), " root node(s) from dump");

    match linked.len() {
        0 => Ok(None),
        1 => Ok(linked.pop()),
        count => return_syntax_error!(
            format!("Expected a single root node, found {}", count),
            first_line
        ),
    }
}

fn close_top(stack: &mut Vec<OutlineNode>, roots: &mut Vec<OutlineNode>) {
    if let Some(closed) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(closed),
            None => roots.push(closed),
        }
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<OutlineNode, CompilerError> {
    let leading = &line[..line.len() - line.trim_start().len()];
    if leading.contains('\t') {
        return_syntax_error!("Indentation must use spaces, not tabs", line_number);
    }

    let spaces = line.len() - line.trim_start_matches(' ').len();
    if spaces % 2 != 0 {
        return_syntax_error!(
            "Indentation must be a multiple of two spaces",
            line_number
        );
    }

    let text = line.trim();
    let (label, payload) = match text.find(" (") {
        Some(open) if text.ends_with(')') => (
            &text[..open],
            Some(text[open + 2..text.len() - 1].to_owned()),
        ),
        _ => (text, None),
    };

    Ok(OutlineNode {
        label: label.to_owned(),
        payload,
        line_number,
        depth: spaces / 2,
        children: Vec::new(),
    })
}

fn convert_all(outlines: Vec<OutlineNode>) -> Result<Vec<Box<Node>>, CompilerError> {
    let nodes = outlines
        .into_iter()
        .map(convert)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(link_expression_lists(nodes))
}

// An EXPR_LIST followed by another EXPR_LIST on the same level is the rest of that list
fn link_expression_lists(nodes: Vec<Box<Node>>) -> Vec<Box<Node>> {
    let mut linked: Vec<Box<Node>> = Vec::with_capacity(nodes.len());

    for mut node in nodes.into_iter().rev() {
        if let Node::ExprList { rest, .. } = node.as_mut() {
            let next_is_list = matches!(linked.last().map(|n| n.as_ref()), Some(Node::ExprList { .. }));
            if rest.is_none() && next_is_list {
                *rest = linked.pop();
            }
        }
        linked.push(node);
    }

    linked.reverse();
    linked
}

fn convert(outline: OutlineNode) -> Result<Box<Node>, CompilerError> {
    let OutlineNode {
        label,
        payload,
        line_number,
        children,
        ..
    } = outline;

    let children = convert_all(children)?;

    let node = match label.as_str() {
        "INT" => {
            let text = require_payload(&label, payload, line_number)?;
            match text.trim().parse::<i64>() {
                Ok(value) => Node::IntLiteral(value),
                Err(_) => return_syntax_error!(
                    format!("Invalid integer literal '{}'", text),
                    line_number
                ),
            }
        }

        "STRING" => {
            let text = require_payload(&label, payload, line_number)?;
            let unquoted = text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(&text);
            Node::StringLiteral(unquoted.to_owned())
        }

        "VAR" => Node::VarRef(require_payload(&label, payload, line_number)?),
        "TYPE" => Node::TypeName(require_payload(&label, payload, line_number)?),

        "DECLARATION" => {
            let name = require_payload(&label, payload, line_number)?;
            let [initializer] = take_links(&label, children, line_number)?;
            Node::Declaration { name, initializer }
        }

        "BINARY_EXPR" => {
            let symbol = require_payload(&label, payload, line_number)?;
            let Some(operator) = BinaryOperator::from_symbol(&symbol) else {
                return_syntax_error!(
                    format!("Unknown binary operator '{}'", symbol),
                    line_number
                );
            };
            let [left, right] = take_links(&label, children, line_number)?;
            Node::BinaryOp {
                operator,
                left,
                right,
            }
        }

        "UNARY_EXPR" => {
            let symbol = require_payload(&label, payload, line_number)?;
            let Some(operator) = UnaryOperator::from_symbol(&symbol) else {
                return_syntax_error!(
                    format!("Unknown unary operator '{}'", symbol),
                    line_number
                );
            };
            let [operand] = take_links(&label, children, line_number)?;
            Node::UnaryOp { operator, operand }
        }

        "FUNCTION_CALL" => {
            let name = require_payload(&label, payload, line_number)?;
            let [arguments] = take_links(&label, children, line_number)?;
            Node::FunctionCall { name, arguments }
        }

        "FUNCTION_DEF" => {
            let name = require_payload(&label, payload, line_number)?;
            let [body] = take_links(&label, children, line_number)?;
            Node::FunctionDef { name, body }
        }

        "IF_STMT" => {
            let [condition, then_branch] = take_links(&label, children, line_number)?;
            Node::If {
                condition,
                then_branch,
            }
        }

        "FOR_STMT" => {
            let [init, condition, update, body] = take_links(&label, children, line_number)?;
            Node::For {
                init,
                condition,
                update,
                body,
            }
        }

        "RETURN_STMT" => {
            let [value] = take_links(&label, children, line_number)?;
            Node::Return { value }
        }

        // The rest of the list is linked afterwards by the parent
        "EXPR_LIST" => {
            let [expr] = take_links(&label, children, line_number)?;
            Node::ExprList { expr, rest: None }
        }

        "SEQUENCE" => {
            let [first, second] = take_links(&label, children, line_number)?;
            Node::Sequence { first, second }
        }

        _ => return_syntax_error!(format!("Unknown node label '{}'", label), line_number),
    };

    Ok(Box::new(node))
}

fn require_payload(
    label: &str,
    payload: Option<String>,
    line_number: usize,
) -> Result<String, CompilerError> {
    match payload {
        Some(payload) => Ok(payload),
        None => return_syntax_error!(
            format!("{} is missing its value in parentheses", label),
            line_number
        ),
    }
}

// Fills the links of a node in order, leaving the trailing ones absent
fn take_links<const N: usize>(
    label: &str,
    children: Vec<Box<Node>>,
    line_number: usize,
) -> Result<[Link; N], CompilerError> {
    if children.len() > N {
        return_syntax_error!(
            format!(
                "{} takes at most {} children, found {}",
                label,
                N,
                children.len()
            ),
            line_number
        );
    }

    let mut children = children.into_iter();
    Ok(std::array::from_fn(|_| children.next()))
}
