use super::optimizer_test_support::{if_literal, int_binary, print_call};
use crate::compiler_frontend::ast::ast_nodes::Node;
use crate::compiler_frontend::ast::operators::BinaryOperator;
use crate::compiler_frontend::optimizers::OptimizationReport;
use crate::compiler_frontend::optimizers::dead_code_elimination::{
    eliminate_dead_code, eliminate_tree,
};

#[test]
fn if_zero_disappears() {
    let tree = if_literal(0, print_call(Node::string("never")));
    assert_eq!(eliminate_dead_code(Some(tree)), None);
}

#[test]
fn if_one_is_replaced_by_its_processed_body() {
    // if (1) { print; if (0) { print } }
    let body = Node::sequence(
        Some(print_call(Node::string("always"))),
        Some(if_literal(0, print_call(Node::string("never")))),
    );
    let tree = if_literal(1, body);

    let mut report = OptimizationReport::default();
    let eliminated = eliminate_tree(Some(tree), &mut report);

    let expected = Node::sequence(Some(print_call(Node::string("always"))), None);
    assert_eq!(eliminated, Some(expected));
    assert_eq!(report.inlined_branches, 1);
    assert_eq!(report.eliminated_branches, 1);
}

#[test]
fn non_literal_conditions_keep_the_if_but_clean_its_body() {
    let tree = Node::if_stmt(
        Node::var("flag"),
        Node::sequence(
            Some(print_call(Node::var("flag"))),
            Some(if_literal(0, print_call(Node::string("never")))),
        ),
    );

    let expected = Node::if_stmt(
        Node::var("flag"),
        Node::sequence(Some(print_call(Node::var("flag"))), None),
    );

    assert_eq!(eliminate_dead_code(Some(tree)), Some(expected));
}

#[test]
fn literals_other_than_zero_and_one_are_left_alone() {
    let tree = if_literal(2, print_call(Node::string("maybe")));
    assert_eq!(eliminate_dead_code(Some(tree.clone())), Some(tree));
}

#[test]
fn if_without_then_branch_is_left_alone() {
    let tree = Box::new(Node::If {
        condition: Some(Node::int(0)),
        then_branch: None,
    });

    assert_eq!(eliminate_dead_code(Some(tree.clone())), Some(tree));
}

#[test]
fn statement_after_return_is_dropped() {
    let tree = Node::sequence(
        Some(Node::return_stmt(Some(Node::var("x")))),
        Some(print_call(Node::string("unreachable"))),
    );

    let mut report = OptimizationReport::default();
    let eliminated = eliminate_tree(Some(tree), &mut report);

    let expected = Node::sequence(Some(Node::return_stmt(Some(Node::var("x")))), None);
    assert_eq!(eliminated, Some(expected));
    assert_eq!(report.dropped_unreachable, 1);
}

#[test]
fn dropped_statements_are_not_visited() {
    // The if (1) after the return would be inlined if it were visited
    let tree = Node::sequence(
        Some(Node::return_stmt(Some(Node::int(0)))),
        Some(if_literal(1, print_call(Node::string("unreachable")))),
    );

    let mut report = OptimizationReport::default();
    eliminate_tree(Some(tree), &mut report);

    assert_eq!(report.inlined_branches, 0);
    assert_eq!(report.dropped_unreachable, 1);
}

#[test]
fn return_exposed_by_an_inlined_branch_cuts_the_rest() {
    // if (1) return 1; print("after");
    let tree = Node::sequence(
        Some(if_literal(1, Node::return_stmt(Some(Node::int(1))))),
        Some(print_call(Node::string("after"))),
    );

    let expected = Node::sequence(Some(Node::return_stmt(Some(Node::int(1)))), None);
    assert_eq!(eliminate_dead_code(Some(tree)), Some(expected));
}

#[test]
fn return_nested_deeper_in_the_first_statement_does_not_cut() {
    // (return; a); b -- the outer first statement is a sequence, not a return
    let inner = Node::sequence(
        Some(Node::return_stmt(None)),
        Some(print_call(Node::string("a"))),
    );
    let tree = Node::sequence(Some(inner), Some(print_call(Node::string("b"))));

    let expected = Node::sequence(
        Some(Node::sequence(Some(Node::return_stmt(None)), None)),
        Some(print_call(Node::string("b"))),
    );

    assert_eq!(eliminate_dead_code(Some(tree)), Some(expected));
}

#[test]
fn unfolded_conditions_are_not_evaluated() {
    let tree = Node::if_stmt(
        int_binary(BinaryOperator::Subtract, 1, 1),
        print_call(Node::string("kept")),
    );

    assert_eq!(eliminate_dead_code(Some(tree.clone())), Some(tree));
}

#[test]
fn dead_branches_inside_functions_are_removed() {
    let tree = Node::function(
        "main",
        Node::sequence_from(vec![
            Node::declaration("x", Some(Node::int(1))),
            if_literal(0, print_call(Node::var("x"))),
            Node::return_stmt(Some(Node::var("x"))),
        ]),
    );

    let expected = Node::function(
        "main",
        Some(Node::sequence(
            Some(Node::sequence(
                Some(Node::declaration("x", Some(Node::int(1)))),
                None,
            )),
            Some(Node::return_stmt(Some(Node::var("x")))),
        )),
    );

    assert_eq!(eliminate_dead_code(Some(tree)), Some(expected));
}
