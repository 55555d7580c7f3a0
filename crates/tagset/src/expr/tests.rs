//! Tests for the expression parser and evaluator.

use super::*;
use crate::registry::TagRegistry;
use crate::TagError;

// ==================== Parser Shape Tests ====================

#[test]
fn test_parse_every_operator() {
    for (text, op) in [
        ("a & b", SetOp::Intersection),
        ("a | b", SetOp::Union),
        ("a - b", SetOp::Difference),
        ("a ^ b", SetOp::SymmetricDifference),
    ] {
        let expr = ExprParser::parse(text).unwrap();
        assert_eq!(
            expr,
            Expr::binary(op, Expr::tag("a"), Expr::tag("b")),
            "parsing {text:?}"
        );
    }
}

#[test]
fn test_parse_grouping_overrides_associativity() {
    let grouped = ExprParser::parse("a - (b - c)").unwrap();
    let flat = ExprParser::parse("a - b - c").unwrap();
    assert_ne!(grouped, flat);
    assert_eq!(
        grouped,
        Expr::binary(
            SetOp::Difference,
            Expr::tag("a"),
            Expr::binary(SetOp::Difference, Expr::tag("b"), Expr::tag("c")),
        )
    );
}

#[test]
fn test_parse_raw_names_are_preserved() {
    // Normalization happens at evaluation, not parsing.
    let expr = ExprParser::parse("Staging_42").unwrap();
    assert_eq!(expr, Expr::tag("Staging_42"));
}

// ==================== Parser Error Tests ====================

#[test]
fn test_parse_errors() {
    assert!(matches!(
        ExprParser::parse("").unwrap_err(),
        ExprError::EmptyExpression
    ));
    assert!(matches!(
        ExprParser::parse("a &").unwrap_err(),
        ExprError::UnexpectedEndOfInput
    ));
    assert!(matches!(
        ExprParser::parse("a & & b").unwrap_err(),
        ExprError::UnexpectedToken { .. }
    ));
    assert!(matches!(
        ExprParser::parse("((a | b)").unwrap_err(),
        ExprError::UnclosedParenthesis
    ));
    assert!(matches!(
        ExprParser::parse("a @ b").unwrap_err(),
        ExprError::UnexpectedCharacter { character: '@', .. }
    ));
}

// ==================== Evaluation Tests ====================

fn demo_registry() -> TagRegistry<&'static str> {
    let mut registry = TagRegistry::new();
    registry
        .get_or_create("small")
        .unwrap()
        .set_objects(["ant", "bee"]);
    registry
        .get_or_create("flying")
        .unwrap()
        .set_objects(["bee", "crow"]);
    registry
        .get_or_create("loud")
        .unwrap()
        .set_objects(["crow"]);
    registry
}

#[test]
fn test_evaluate_chained_operators_left_to_right() {
    let registry = demo_registry();
    let resolver = ObjectResolver::new(&registry);
    // (small | flying) - loud
    assert_eq!(
        resolver.evaluate("small | flying - loud").unwrap(),
        ["ant", "bee"].into_iter().collect()
    );
}

#[test]
fn test_evaluate_respects_grouping() {
    let registry = demo_registry();
    let resolver = ObjectResolver::new(&registry);
    // flying - loud leaves just "bee"; the union adds the small ones back.
    assert_eq!(
        resolver.evaluate("small | (flying - loud)").unwrap(),
        ["ant", "bee"].into_iter().collect()
    );
    assert_eq!(
        resolver.evaluate("(small | flying) & flying").unwrap(),
        ["bee", "crow"].into_iter().collect()
    );
}

#[test]
fn test_evaluate_normalizes_variable_names() {
    let registry = demo_registry();
    let resolver = ObjectResolver::new(&registry);
    // "Small" collapses to the same registry key as "small".
    assert_eq!(
        resolver.evaluate("Small").unwrap(),
        ["ant", "bee"].into_iter().collect()
    );
}

#[test]
fn test_evaluate_wraps_syntax_errors() {
    let registry = demo_registry();
    let resolver = ObjectResolver::new(&registry);
    let err = resolver.evaluate("small - ").unwrap_err();
    assert_eq!(
        err,
        TagError::Expression(ExprError::UnexpectedEndOfInput)
    );
}
