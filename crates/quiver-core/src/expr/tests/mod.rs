mod property;

use super::*;
use crate::{
    error::ErrorKind,
    value::{List, f32_vector, matrix},
};
use serde_json::json;

fn assert_same(left: &Expr, right: &Expr) {
    assert!(
        left.structural_eq(right),
        "trees differ:\n  left:  {left}\n  right: {right}"
    );
}

// ----------------------------------------------------------------------
// Structural equality
// ----------------------------------------------------------------------

#[test]
fn field_equality_is_structural() {
    assert!(field("a").structural_eq(&field("a")));
    assert!(!field("a").structural_eq(&field("b")));
    assert!(!field("a").structural_eq(&literal("a")));
}

#[test]
fn operand_order_is_significant() {
    let ab = field("a") - field("b");
    let ba = field("b") - field("a");

    assert!(!ab.structural_eq(&ba));
    assert!(!all([field("x"), field("y")]).structural_eq(&all([field("y"), field("x")])));
    assert!(!all([field("x")]).structural_eq(&any([field("x")])));
}

#[test]
fn builders_do_not_mutate_operands() {
    let base = field("a");
    let sum = &base + 1;

    assert_same(&base, &field("a"));
    assert_same(&sum, &field("a").add(literal(1)));
}

// ----------------------------------------------------------------------
// Operator / method equivalence
// ----------------------------------------------------------------------

#[test]
fn scalar_operand_is_wrapped_as_literal() {
    assert_same(&(field("a") + 1), &(field("a") + literal(1)));
    assert_same(&(field("a") * 2.5), &field("a").mul(literal(2.5)));
}

#[test]
fn mixed_chain_matches_method_form() {
    let infix = (field("a") - field("b")).gt(field("c") * 2);
    let methods = field("a").sub(field("b")).gt(field("c").mul(2));

    assert_same(&infix, &methods);
}

#[test]
fn commutative_reflection_mirrors_operands() {
    assert_same(&(1 + field("a")), &(field("a") + literal(1)));
    assert_same(&(3.0 * field("a")), &(field("a") * 3.0));
    assert_same(&(true & field("flag")), &field("flag").and(true));
    assert_same(&(false | field("flag")), &field("flag").or(false));
}

#[test]
fn non_commutative_reflection_keeps_literal_left() {
    assert_same(&(1_i32 - field("a")), &(literal(1) - field("a")));
    assert_same(&(1.0 / field("a")), &literal(1.0).div(field("a")));
    assert!(!(1_i32 - field("a")).structural_eq(&(field("a") - 1)));
}

#[test]
fn logical_infix_matches_methods() {
    let a = field("a").eq(1);
    let b = field("b").ne("x");

    assert_same(&(a.clone() & b.clone()), &a.clone().and(b.clone()));
    assert_same(&(a.clone() | b.clone()), &a.clone().or(b));
    assert_same(&!a.clone(), &a.clone().not());
    assert_same(&!&a, &not(a));
}

#[test]
fn double_negation_is_preserved() {
    let twice = not(not(field("a")));

    let Expr::Unary { op, expr } = &twice else {
        panic!("expected unary node");
    };
    assert_eq!(*op, UnaryOp::Not);
    assert!(matches!(**expr, Expr::Unary { op: UnaryOp::Not, .. }));
}

#[test]
fn unary_methods_build_unary_nodes() {
    let cases = [
        (field("a").abs(), UnaryOp::Abs),
        (field("a").ln(), UnaryOp::Ln),
        (field("a").exp(), UnaryOp::Exp),
        (field("a").sqrt(), UnaryOp::Sqrt),
        (field("a").square(), UnaryOp::Square),
        (field("a").is_null(), UnaryOp::IsNull),
        (field("a").is_not_null(), UnaryOp::IsNotNull),
    ];

    for (expr, expected) in cases {
        let Expr::Unary { op, expr: inner } = expr else {
            panic!("expected unary node");
        };
        assert_eq!(op, expected);
        assert_same(&inner, &field("a"));
    }
}

// ----------------------------------------------------------------------
// Sugar and string/list operators
// ----------------------------------------------------------------------

#[test]
fn boost_is_choose_times_factor() {
    let pred = field("summary").match_any("love");
    let boosted = bm25_base().boost(pred.clone(), 1.5);
    let expanded = bm25_base() * pred.choose(literal(1.5), literal(1.0));

    assert_same(&boosted, &expanded);
}

fn bm25_base() -> Expr {
    fns::bm25_score()
}

#[test]
fn regexp_match_encodes_pattern_and_flags() {
    let with_flags = field("title").regexp_match("^the", Some("i"));
    let without = field("title").regexp_match("^the", None);

    assert_same(
        &with_flags,
        &Expr::ternary(
            TernaryOp::RegexpMatch,
            field("title"),
            literal("^the"),
            literal("i"),
        ),
    );
    let Expr::Ternary { z, .. } = without else {
        panic!("expected ternary node");
    };
    assert_same(&z, &literal(crate::value::Value::Null));
}

#[test]
fn match_all_accepts_string_or_list() {
    let from_list = field("tags").match_all(vec!["a", "b"]);

    assert_same(
        &from_list,
        &Expr::binary(
            field("tags"),
            BinaryOp::MatchAll,
            literal(List::String(vec!["a".to_string(), "b".to_string()])),
        ),
    );
    assert_same(
        &field("tags").match_any("a"),
        &Expr::binary(field("tags"), BinaryOp::MatchAny, literal("a")),
    );
}

#[test]
fn in_accepts_typed_lists_and_strings() {
    assert_same(
        &field("year").in_(vec![1999_i64, 2000]),
        &Expr::binary(field("year"), BinaryOp::In, literal(List::I64(vec![1999, 2000]))),
    );
    assert_same(
        &field("letter").in_("abc"),
        &Expr::binary(field("letter"), BinaryOp::In, literal("abc")),
    );
}

#[test]
fn coalesce_min_max_choose_build_expected_nodes() {
    assert_same(
        &field("a").coalesce(0),
        &Expr::binary(field("a"), BinaryOp::Coalesce, literal(0)),
    );
    assert_same(
        &field("a").min(field("b")).max(1.0),
        &Expr::binary(
            Expr::binary(field("a"), BinaryOp::Min, field("b")),
            BinaryOp::Max,
            literal(1.0),
        ),
    );
    assert_same(
        &field("flag").choose(field("x"), None::<i64>),
        &Expr::ternary(
            TernaryOp::Choose,
            field("flag"),
            field("x"),
            literal(crate::value::Value::Null),
        ),
    );
}

// ----------------------------------------------------------------------
// Text match
// ----------------------------------------------------------------------

#[test]
fn match_defaults_and_builder() {
    let m = r#match("love");
    assert_eq!(m.field, None);
    assert!((m.weight - 1.0).abs() < f32::EPSILON);
    assert!(!m.all);

    let m = r#match("love").field("summary").weight(2.0).all(true);
    assert_eq!(m.field.as_deref(), Some("summary"));
    assert!(m.all);
}

#[test]
fn combined_matches_keep_their_own_settings() {
    let left = r#match("love").field("summary").weight(2.0);
    let right = r#match("war").all(true);
    let combined = left.clone() | right.clone();

    let Expr::Binary {
        left: l,
        op,
        right: r,
    } = &combined
    else {
        panic!("expected binary node");
    };
    assert_eq!(*op, BinaryOp::Or);
    assert!(matches!(&**l, Expr::Match(m) if *m == left));
    assert!(matches!(&**r, Expr::Match(m) if *m == right));

    let both = r#match("a") & r#match("b");
    assert!(matches!(both, Expr::Binary { op: BinaryOp::And, .. }));
}

// ----------------------------------------------------------------------
// Functions and display
// ----------------------------------------------------------------------

#[test]
fn function_nodes_compare_by_arguments() {
    let a = fns::vector_distance("embedding", f32_vector([1.0, 2.0]));
    let b = fns::vector_distance("embedding", vec![1.0_f32, 2.0]);
    let c = fns::vector_distance_with("embedding", vec![1.0_f32, 2.0], true);

    assert_same(&a, &b);
    assert!(!a.structural_eq(&c));

    let m = matrix([[1.0, 2.0]], None).unwrap();
    let multi = fns::multi_vector_distance("tokens", m, Some(10));
    let Expr::Function(func) = &multi else {
        panic!("expected function node");
    };
    assert_eq!(func.name(), "multi_vector_distance");
    assert_eq!(func.field(), Some("tokens"));
}

#[test]
fn display_renders_tree() {
    let expr = field("a") + 1;

    assert_eq!(
        expr.to_string(),
        "Binary(left=field(a), op=Add, right=literal(I64(1)))"
    );
    assert_eq!(
        all([field("x"), field("y")]).to_string(),
        "Nary(op=All, exprs=[field(x), field(y)])"
    );
    assert_eq!(fns::bm25_score().to_string(), "bm25_score()");
}

// ----------------------------------------------------------------------
// N-ary construction
// ----------------------------------------------------------------------

#[test]
fn wide_nary_nodes_construct_without_limit() {
    let wide = any((0..100).map(|i| field("n").eq(i)));

    let Expr::Nary { op, exprs } = wide else {
        panic!("expected n-ary node");
    };
    assert_eq!(op, NaryOp::Any);
    assert_eq!(exprs.len(), 100);
}

// ----------------------------------------------------------------------
// Dynamic coercion boundary
// ----------------------------------------------------------------------

#[test]
fn dynamic_operands_build_the_same_trees() {
    let typed = field("a") + 1;
    let dynamic = field("a").apply(BinaryOp::Add, json!(1)).unwrap();

    assert_same(&typed, &dynamic);

    let typed = field("tags").in_(vec!["a", "b"]);
    let dynamic = field("tags").apply(BinaryOp::In, json!(["a", "b"])).unwrap();
    assert_same(&typed, &dynamic);
}

#[test]
fn unsupported_operands_are_type_errors() {
    for bad in [json!({"a": 1}), json!([1, 2]), json!(null), json!("string")] {
        let found = Operand::from(bad.clone()).type_name().to_string();
        let err = field("a").apply(BinaryOp::Add, bad).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TypeCoercion);
        assert!(err.to_string().contains("`other`"));
        assert!(err.to_string().contains(&found));
    }

    let err = field("a")
        .apply(BinaryOp::And, Operand::Other("object".to_string()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeCoercion);
    assert!(err.to_string().contains("object"));
}

#[test]
fn json_integers_past_i64_are_not_widened_to_float() {
    let err = field("a").apply(BinaryOp::Add, json!(u64::MAX)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TypeCoercion);
    assert!(err.to_string().contains("u64 out of i64 range"));

    let at_max = field("a").apply(BinaryOp::Add, json!(i64::MAX)).unwrap();
    assert_same(&at_max, &(field("a") + i64::MAX));

    let fractional = field("a").apply(BinaryOp::Add, json!(1.5)).unwrap();
    assert_same(&fractional, &(field("a") + 1.5));
}

#[test]
fn null_is_accepted_only_in_equality_position() {
    assert!(field("a").apply(BinaryOp::Eq, json!(null)).is_ok());
    assert!(field("a").apply(BinaryOp::NotEq, json!(null)).is_ok());
    assert_eq!(
        field("a").apply(BinaryOp::Lt, json!(null)).unwrap_err().kind(),
        ErrorKind::TypeCoercion
    );
}

#[test]
fn chained_construction_fails_at_first_bad_operand() {
    let err = (literal(1) + field("a"))
        .apply(BinaryOp::Add, "string")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TypeCoercion);
    assert!(err.to_string().contains("got string"));
}

#[test]
fn reflected_dynamic_operands_follow_operator_rules() {
    assert_same(
        &field("a").apply_reflected(BinaryOp::Add, 1).unwrap(),
        &(1 + field("a")),
    );
    assert_same(
        &field("a").apply_reflected(BinaryOp::Sub, 1).unwrap(),
        &(1 - field("a")),
    );
    assert_same(
        &field("a").apply_reflected(BinaryOp::Gt, 1).unwrap(),
        &field("a").lt(1),
    );
    assert_eq!(
        field("a")
            .apply_reflected(BinaryOp::StartsWith, "x")
            .unwrap_err()
            .kind(),
        ErrorKind::UnsupportedOperation
    );
}

#[test]
fn modular_pow_is_not_implemented() {
    let err = field("a").try_pow(2, Some(Operand::Int(3))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    assert!(err.to_string().contains("not implemented"));

    assert_same(&field("a").try_pow(2, None).unwrap(), &field("a").pow(2));

    let err = field("a").try_pow(json!({}), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeCoercion);
}

#[test]
fn native_truthiness_is_rejected() {
    let predicate = field("a").gt(1);
    let err = bool::try_from(&predicate).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    assert_eq!(err.to_string(), LOGICAL_KEYWORDS_UNSUPPORTED);
}
