use crate::compiler_frontend::ast::ast_nodes::Node;
use crate::compiler_frontend::ast::operators::{BinaryOperator, UnaryOperator};

pub(crate) fn int_binary(operator: BinaryOperator, lhs: i64, rhs: i64) -> Box<Node> {
    Node::binary(operator, Node::int(lhs), Node::int(rhs))
}

/// `printf(arg)`
pub(crate) fn print_call(arg: Box<Node>) -> Box<Node> {
    Node::call("printf", Node::expr_list_from(vec![arg]))
}

/// `for (int i = start; i < bound; i++) body`
pub(crate) fn counted_loop(start: i64, bound: i64, body: Box<Node>) -> Box<Node> {
    Node::for_loop(
        Node::declaration("i", Some(Node::int(start))),
        Node::binary(BinaryOperator::LessThan, Node::var("i"), Node::int(bound)),
        Node::unary(UnaryOperator::Increment, Node::var("i")),
        body,
    )
}

/// `if (condition) body`
pub(crate) fn if_literal(condition: i64, body: Box<Node>) -> Box<Node> {
    Node::if_stmt(Node::int(condition), body)
}
