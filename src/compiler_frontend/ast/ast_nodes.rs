//! Tree Model
//!
//! Every statement and expression kind of the source language has its own variant with
//! named links. A parent owns its children by value, so a subtree can only ever be
//! reachable from one place: cloning is a deep copy and dropping releases everything below.
//!
//! Links are optional because lossy producers (the dump reader) and earlier passes
//! (dead-code elimination can reduce a body to nothing) may leave holes. A pass that needs
//! a link that is absent leaves the node untouched.

use crate::compiler_frontend::ast::operators::{BinaryOperator, UnaryOperator};
use serde::{Deserialize, Serialize};

/// An optional owned subtree.
pub type Link = Option<Box<Node>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    // Leaves
    IntLiteral(i64),
    StringLiteral(String),
    VarRef(String),
    TypeName(String),

    Declaration {
        name: String,
        initializer: Link,
    },

    BinaryOp {
        operator: BinaryOperator,
        left: Link,
        right: Link,
    },

    UnaryOp {
        operator: UnaryOperator,
        operand: Link,
    },

    FunctionCall {
        name: String,
        arguments: Link, // ExprList chain
    },

    FunctionDef {
        name: String,
        body: Link,
    },

    // No else slot
    If {
        condition: Link,
        then_branch: Link,
    },

    For {
        init: Link,
        condition: Link,
        update: Link,
        body: Link,
    },

    Return {
        value: Link,
    },

    ExprList {
        expr: Link,
        rest: Link,
    },

    // Binary chaining, not a flat list
    Sequence {
        first: Link,
        second: Link,
    },
}

impl Node {
    pub fn int(value: i64) -> Box<Node> {
        Box::new(Node::IntLiteral(value))
    }

    pub fn string(value: impl Into<String>) -> Box<Node> {
        Box::new(Node::StringLiteral(value.into()))
    }

    pub fn var(name: impl Into<String>) -> Box<Node> {
        Box::new(Node::VarRef(name.into()))
    }

    pub fn type_name(name: impl Into<String>) -> Box<Node> {
        Box::new(Node::TypeName(name.into()))
    }

    pub fn declaration(name: impl Into<String>, initializer: Link) -> Box<Node> {
        Box::new(Node::Declaration {
            name: name.into(),
            initializer,
        })
    }

    pub fn binary(operator: BinaryOperator, left: Box<Node>, right: Box<Node>) -> Box<Node> {
        Box::new(Node::BinaryOp {
            operator,
            left: Some(left),
            right: Some(right),
        })
    }

    pub fn unary(operator: UnaryOperator, operand: Box<Node>) -> Box<Node> {
        Box::new(Node::UnaryOp {
            operator,
            operand: Some(operand),
        })
    }

    pub fn call(name: impl Into<String>, arguments: Link) -> Box<Node> {
        Box::new(Node::FunctionCall {
            name: name.into(),
            arguments,
        })
    }

    pub fn function(name: impl Into<String>, body: Link) -> Box<Node> {
        Box::new(Node::FunctionDef {
            name: name.into(),
            body,
        })
    }

    pub fn if_stmt(condition: Box<Node>, then_branch: Box<Node>) -> Box<Node> {
        Box::new(Node::If {
            condition: Some(condition),
            then_branch: Some(then_branch),
        })
    }

    pub fn for_loop(
        init: Box<Node>,
        condition: Box<Node>,
        update: Box<Node>,
        body: Box<Node>,
    ) -> Box<Node> {
        Box::new(Node::For {
            init: Some(init),
            condition: Some(condition),
            update: Some(update),
            body: Some(body),
        })
    }

    pub fn return_stmt(value: Link) -> Box<Node> {
        Box::new(Node::Return { value })
    }

    pub fn expr_list(expr: Box<Node>, rest: Link) -> Box<Node> {
        Box::new(Node::ExprList {
            expr: Some(expr),
            rest,
        })
    }

    /// Builds an argument chain from a list of expressions, preserving their order.
    pub fn expr_list_from(exprs: Vec<Box<Node>>) -> Link {
        exprs
            .into_iter()
            .rev()
            .fold(None, |rest, expr| Some(Node::expr_list(expr, rest)))
    }

    pub fn sequence(first: Link, second: Link) -> Box<Node> {
        Box::new(Node::Sequence { first, second })
    }

    /// Chains statements the way the parser does: each new statement becomes
    /// the second half of a `Sequence` whose first half is everything before it.
    pub fn sequence_from(statements: impl IntoIterator<Item = Box<Node>>) -> Link {
        statements.into_iter().fold(None, |chain, statement| match chain {
            None => Some(statement),
            Some(previous) => Some(Node::sequence(Some(previous), Some(statement))),
        })
    }

    pub fn as_int_literal(&self) -> Option<i64> {
        match self {
            Node::IntLiteral(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_int_literal(&self, expected: i64) -> bool {
        self.as_int_literal() == Some(expected)
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Node::Return { .. })
    }

    /// The fixed label the printer uses for this kind of node.
    pub fn label(&self) -> &'static str {
        match self {
            Node::IntLiteral(_) => "INT",
            Node::StringLiteral(_) => "STRING",
            Node::VarRef(_) => "VAR",
            Node::Declaration { .. } => "DECLARATION",
            Node::BinaryOp { .. } => "BINARY_EXPR",
            Node::UnaryOp { .. } => "UNARY_EXPR",
            Node::FunctionCall { .. } => "FUNCTION_CALL",
            Node::FunctionDef { .. } => "FUNCTION_DEF",
            Node::If { .. } => "IF_STMT",
            Node::For { .. } => "FOR_STMT",
            Node::Return { .. } => "RETURN_STMT",
            Node::ExprList { .. } => "EXPR_LIST",
            Node::Sequence { .. } => "SEQUENCE",
            Node::TypeName(_) => "TYPE",
        }
    }

    /// The text shown in parentheses after the label, if this kind carries any.
    pub fn payload(&self) -> Option<String> {
        match self {
            Node::IntLiteral(value) => Some(value.to_string()),
            Node::StringLiteral(value) => Some(format!("\"{}\"", value)),
            Node::VarRef(name)
            | Node::TypeName(name)
            | Node::Declaration { name, .. }
            | Node::FunctionCall { name, .. }
            | Node::FunctionDef { name, .. } => Some(name.to_owned()),
            Node::BinaryOp { operator, .. } => Some(operator.to_str().to_owned()),
            Node::UnaryOp { operator, .. } => Some(operator.to_str().to_owned()),
            Node::If { .. }
            | Node::For { .. }
            | Node::Return { .. }
            | Node::ExprList { .. }
            | Node::Sequence { .. } => None,
        }
    }

    /// Present children in print order: childA, childB, then any sibling-chain links.
    pub fn children(&self) -> Vec<&Node> {
        let links: Vec<&Link> = match self {
            Node::IntLiteral(_) | Node::StringLiteral(_) | Node::VarRef(_) | Node::TypeName(_) => {
                Vec::new()
            }
            Node::Declaration { initializer, .. } => vec![initializer],
            Node::BinaryOp { left, right, .. } => vec![left, right],
            Node::UnaryOp { operand, .. } => vec![operand],
            Node::FunctionCall { arguments, .. } => vec![arguments],
            Node::FunctionDef { body, .. } => vec![body],
            Node::If {
                condition,
                then_branch,
            } => vec![condition, then_branch],
            Node::For {
                init,
                condition,
                update,
                body,
            } => vec![init, condition, update, body],
            Node::Return { value } => vec![value],
            Node::ExprList { expr, rest } => vec![expr, rest],
            Node::Sequence { first, second } => vec![first, second],
        };

        links.into_iter().filter_map(|link| link.as_deref()).collect()
    }

    /// Mutable access to every link of this node, in the same order as [`Node::children`].
    pub fn links_mut(&mut self) -> Vec<&mut Link> {
        match self {
            Node::IntLiteral(_) | Node::StringLiteral(_) | Node::VarRef(_) | Node::TypeName(_) => {
                Vec::new()
            }
            Node::Declaration { initializer, .. } => vec![initializer],
            Node::BinaryOp { left, right, .. } => vec![left, right],
            Node::UnaryOp { operand, .. } => vec![operand],
            Node::FunctionCall { arguments, .. } => vec![arguments],
            Node::FunctionDef { body, .. } => vec![body],
            Node::If {
                condition,
                then_branch,
            } => vec![condition, then_branch],
            Node::For {
                init,
                condition,
                update,
                body,
            } => vec![init, condition, update, body],
            Node::Return { value } => vec![value],
            Node::ExprList { expr, rest } => vec![expr, rest],
            Node::Sequence { first, second } => vec![first, second],
        }
    }

    /// Replaces each link with the result of `rewrite`, which takes ownership of the old subtree.
    pub fn rewrite_links(&mut self, mut rewrite: impl FnMut(Link) -> Link) {
        for link in self.links_mut() {
            *link = rewrite(link.take());
        }
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::node_count)
            .sum::<usize>()
    }
}

// Unrolled loops build `first` spines as long as their trip count,
// so sequences are unlinked one level at a time
impl Drop for Node {
    fn drop(&mut self) {
        let Node::Sequence { first, .. } = self else {
            return;
        };

        let mut spine = first.take();
        while let Some(mut node) = spine {
            spine = match node.as_mut() {
                Node::Sequence { first, .. } => first.take(),
                _ => None,
            };
        }
    }
}
