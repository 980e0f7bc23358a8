use super::optimizer_test_support::{counted_loop, if_literal, int_binary, print_call};
use crate::compiler_frontend::ast::ast_nodes::Node;
use crate::compiler_frontend::ast::operators::BinaryOperator;
use crate::compiler_frontend::optimizers::constant_folding::fold_constants;
use crate::compiler_frontend::optimizers::dead_code_elimination::eliminate_dead_code;
use crate::compiler_frontend::optimizers::loop_unrolling::unroll_loops;
use proptest::prelude::*;

fn folded_operator() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![
        Just(BinaryOperator::Add),
        Just(BinaryOperator::Subtract),
        Just(BinaryOperator::Multiply),
        Just(BinaryOperator::Divide),
        Just(BinaryOperator::LessThan),
    ]
}

// Exact result in wider arithmetic; it folds only when it fits back into an i64
fn expected_value(operator: BinaryOperator, lhs: i64, rhs: i64) -> Option<i64> {
    let (lhs, rhs) = (i128::from(lhs), i128::from(rhs));

    let exact = match operator {
        BinaryOperator::Add => lhs + rhs,
        BinaryOperator::Subtract => lhs - rhs,
        BinaryOperator::Multiply => lhs * rhs,
        BinaryOperator::Divide if rhs != 0 => lhs / rhs,
        BinaryOperator::LessThan => i128::from(lhs < rhs),
        _ => return None,
    };

    i64::try_from(exact).ok()
}

proptest! {
    #[test]
    fn literal_operands_fold_to_their_value(
        operator in folded_operator(),
        lhs in any::<i64>(),
        rhs in any::<i64>(),
    ) {
        let node = int_binary(operator, lhs, rhs);
        let folded = fold_constants(Some(node.clone()));

        match expected_value(operator, lhs, rhs) {
            Some(value) => prop_assert_eq!(folded, Some(Node::int(value))),
            None => prop_assert_eq!(folded, Some(node)),
        }
    }

    #[test]
    fn division_by_zero_never_folds(lhs in any::<i64>()) {
        let node = int_binary(BinaryOperator::Divide, lhs, 0);
        prop_assert_eq!(fold_constants(Some(node.clone())), Some(node));
    }

    #[test]
    fn boundary_operands_fold_only_when_the_result_fits(
        operator in folded_operator(),
        lhs in prop_oneof![Just(i64::MIN), Just(i64::MAX), Just(-1i64), Just(0i64)],
        rhs in prop_oneof![Just(i64::MIN), Just(i64::MAX), Just(-1i64), Just(1i64)],
    ) {
        let node = int_binary(operator, lhs, rhs);
        let folded = fold_constants(Some(node.clone()));

        match expected_value(operator, lhs, rhs) {
            Some(value) => prop_assert_eq!(folded, Some(Node::int(value))),
            None => prop_assert_eq!(folded, Some(node)),
        }
    }

    #[test]
    fn guarded_bodies_survive_only_when_guarded_by_one(condition in 0i64..2) {
        let body = print_call(Node::var("x"));
        let eliminated = eliminate_dead_code(Some(if_literal(condition, body.clone())));

        if condition == 1 {
            prop_assert_eq!(eliminated, Some(body));
        } else {
            prop_assert_eq!(eliminated, None);
        }
    }

    #[test]
    fn unrolled_size_matches_the_trip_count(start in -20i64..20, bound in -20i64..20) {
        let body = print_call(Node::var("i"));
        let unrolled = unroll_loops(Some(counted_loop(start, bound, body.clone())));

        let trips = (bound - start).max(0) as usize;
        if trips == 0 {
            prop_assert_eq!(unrolled, None);
        } else {
            // One sequence node joins each pair of neighbouring copies
            let expected = trips * body.node_count() + (trips - 1);
            prop_assert_eq!(unrolled.map(|tree| tree.node_count()), Some(expected));
        }
    }
}
