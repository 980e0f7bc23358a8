use crate::compiler_frontend::ast::ast_nodes::Node;
use crate::compiler_frontend::ast::operators::{BinaryOperator, UnaryOperator};

fn sample_body() -> Box<Node> {
    Node::sequence(
        Some(Node::declaration(
            "total",
            Some(Node::binary(
                BinaryOperator::Add,
                Node::var("total"),
                Node::var("i"),
            )),
        )),
        Some(Node::call(
            "printf",
            Node::expr_list_from(vec![Node::string("%d"), Node::var("total")]),
        )),
    )
}

#[test]
fn clones_do_not_share_storage() {
    let original = sample_body();
    let mut first = original.clone();
    let second = original.clone();

    if let Node::Sequence {
        first: Some(declaration),
        ..
    } = first.as_mut()
    {
        if let Node::Declaration { name, .. } = declaration.as_mut() {
            *name = String::from("changed");
        }
    }

    assert_ne!(first, original);
    assert_eq!(second, original);
    assert_eq!(second, sample_body());
}

#[test]
fn sequence_from_chains_statements_left_nested() {
    let chained = Node::sequence_from(vec![Node::var("a"), Node::var("b"), Node::var("c")]);

    let expected = Node::sequence(
        Some(Node::sequence(Some(Node::var("a")), Some(Node::var("b")))),
        Some(Node::var("c")),
    );

    assert_eq!(chained, Some(expected));
    assert_eq!(Node::sequence_from(vec![Node::var("a")]), Some(Node::var("a")));
    assert_eq!(Node::sequence_from(Vec::new()), None);
}

#[test]
fn expr_list_from_keeps_argument_order() {
    let list = Node::expr_list_from(vec![Node::int(1), Node::int(2)]);

    let expected = Node::expr_list(Node::int(1), Some(Node::expr_list(Node::int(2), None)));
    assert_eq!(list, Some(expected));
}

#[test]
fn children_follow_print_order() {
    let tree = Node::for_loop(
        Node::declaration("i", Some(Node::int(0))),
        Node::binary(BinaryOperator::LessThan, Node::var("i"), Node::int(3)),
        Node::unary(UnaryOperator::Increment, Node::var("i")),
        Node::var("body"),
    );

    let labels: Vec<&str> = tree.children().into_iter().map(Node::label).collect();
    assert_eq!(labels, vec!["DECLARATION", "BINARY_EXPR", "UNARY_EXPR", "VAR"]);
    assert_eq!(tree.node_count(), 9);
}

#[test]
fn payloads_decode_to_display_text() {
    assert_eq!(Node::int(-4).payload().as_deref(), Some("-4"));
    assert_eq!(Node::string("hi").payload().as_deref(), Some("\"hi\""));
    assert_eq!(
        Node::unary(UnaryOperator::Increment, Node::var("i"))
            .payload()
            .as_deref(),
        Some("++")
    );
    assert_eq!(Node::return_stmt(None).payload(), None);
}

#[test]
fn operator_symbols_parse_back() {
    for operator in [
        BinaryOperator::LessThanOrEqual,
        BinaryOperator::ShiftRight,
        BinaryOperator::ModulusAssign,
    ] {
        assert_eq!(BinaryOperator::from_symbol(operator.to_str()), Some(operator));
    }

    assert_eq!(UnaryOperator::from_symbol("--"), Some(UnaryOperator::Decrement));
    assert_eq!(BinaryOperator::from_symbol("**"), None);
}

#[test]
fn trees_survive_json() {
    let tree = Some(sample_body());
    let json = serde_json::to_string(&tree).expect("tree should serialize");
    let parsed: Option<Box<Node>> = serde_json::from_str(&json).expect("tree should deserialize");

    assert_eq!(parsed, tree);
}

#[test]
fn dropping_a_long_sequence_spine_does_not_recurse() {
    let statements = (0..200_000).map(|i| Node::declaration("x", Some(Node::int(i))));
    let spine = Node::sequence_from(statements);

    assert!(matches!(spine.as_deref(), Some(Node::Sequence { .. })));
    drop(spine);
}
