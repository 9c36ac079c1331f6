use crate::expr::{BinaryOp, Expr, all, any as any_of, field, literal, not};
use proptest::prelude::*;

const FIELDS: [&str; 4] = ["a", "b", "c", "d"];

fn arb_field() -> impl Strategy<Value = Expr> {
    prop::sample::select(FIELDS.to_vec()).prop_map(field)
}

fn arb_leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        arb_field(),
        any::<i64>().prop_map(literal),
        (-1.0e6..1.0e6_f64).prop_map(literal),
    ]
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    arb_leaf().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l + r),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l - r),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l * r),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l.gt(r)),
            inner.clone().prop_map(Expr::abs),
            prop::collection::vec(inner, 0..4).prop_map(all),
        ]
    })
}

fn arb_predicate() -> impl Strategy<Value = Expr> {
    (arb_field(), any::<i32>()).prop_map(|(f, v)| f.gte(v))
}

proptest! {
    #[test]
    fn structural_eq_is_reflexive_over_clones(expr in arb_expr()) {
        prop_assert!(expr.structural_eq(&expr.clone()));
    }

    #[test]
    fn infix_and_method_forms_agree(left in arb_expr(), right in arb_expr()) {
        prop_assert!((left.clone() + right.clone()).structural_eq(&left.clone().add(right.clone())));
        prop_assert!((left.clone() - right.clone()).structural_eq(&left.clone().sub(right.clone())));
        prop_assert!((left.clone() * right.clone()).structural_eq(&left.clone().mul(right.clone())));
        prop_assert!((left.clone() / right.clone()).structural_eq(&left.clone().div(right.clone())));
        prop_assert!((left.clone() & right.clone()).structural_eq(&left.clone().and(right.clone())));
        prop_assert!((left.clone() | right.clone()).structural_eq(&left.clone().or(right.clone())));
        prop_assert!((!left.clone()).structural_eq(&not(left)));
    }

    #[test]
    fn scalar_reflection_mirrors_commutative_ops(expr in arb_expr(), k in any::<i64>()) {
        prop_assert!((k + expr.clone()).structural_eq(&(expr.clone() + literal(k))));
        prop_assert!((k * expr.clone()).structural_eq(&(expr.clone() * literal(k))));
        prop_assert!((k - expr.clone()).structural_eq(&literal(k).sub(expr.clone())));
        prop_assert!((k - expr.clone()).structural_eq(&literal(k).apply(BinaryOp::Sub, expr).unwrap()));
    }

    #[test]
    fn boost_expands_to_choose(expr in arb_expr(), pred in arb_predicate(), k in -100.0..100.0_f64) {
        let boosted = expr.clone().boost(pred.clone(), k);
        let expanded = expr * pred.choose(literal(k), literal(1.0));

        prop_assert!(boosted.structural_eq(&expanded));
    }

    #[test]
    fn nary_preserves_operand_order(exprs in prop::collection::vec(arb_expr(), 2..40)) {
        let mut reversed = exprs.clone();
        reversed.reverse();

        let forward = any_of(exprs.clone());
        let Expr::Nary { exprs: kept, .. } = &forward else {
            panic!("expected n-ary node");
        };
        prop_assert_eq!(kept.len(), exprs.len());
        for (kept, original) in kept.iter().zip(&exprs) {
            prop_assert!(kept.structural_eq(original));
        }

        let palindrome = exprs.iter().zip(&reversed).all(|(l, r)| l.structural_eq(r));
        prop_assert_eq!(forward.structural_eq(&any_of(reversed)), palindrome);
    }
}
