use super::clause;
use crate::filter::{Expression, LogicalOperator, negate};

#[test]
fn leaf_negation_flips_only_polarity() {
    let leaf = Expression::gt("age", 18).unwrap();

    let negated = -&leaf;

    let inner = negated.as_field().expect("leaf");
    assert!(inner.is_negated());
    assert_eq!(inner.field(), "age");
    assert_eq!(inner.op(), leaf.as_field().unwrap().op());
    assert_eq!(inner.value(), leaf.as_field().unwrap().value());
}

#[test]
fn double_negation_is_identity() {
    let leaf = clause("a");
    assert_eq!(negate(&negate(&leaf)), leaf);

    let tree = (clause("a") & clause("b")) | clause("c");
    assert_eq!(!!tree.clone(), tree);
}

#[test]
fn de_morgan_and_becomes_or_of_negations() {
    let a = clause("a");
    let b = clause("b");

    let negated = -(a.clone() & b.clone());

    assert_eq!(negated, (-a) | (-b));
    assert_eq!(
        negated.as_logical().map(|n| n.op()),
        Some(LogicalOperator::Or)
    );
}

#[test]
fn de_morgan_or_becomes_and_of_negations() {
    let a = clause("a");
    let b = clause("b");

    assert_eq!(!(a.clone() | b.clone()), (!a) & (!b));
}

#[test]
fn negation_recurses_through_full_depth() {
    // NOT( (a AND b) OR c ) → (NOT a OR NOT b) AND NOT c
    let tree = (clause("a") & clause("b")) | clause("c");

    let negated = tree.negate();

    let root = negated.as_logical().expect("root");
    assert_eq!(root.op(), LogicalOperator::And);
    assert_eq!(root.children().len(), 2);

    let inner = root.children()[0].as_logical().expect("inner");
    assert_eq!(inner.op(), LogicalOperator::Or);
    assert!(
        inner
            .children()
            .iter()
            .all(|c| c.as_field().is_some_and(|leaf| leaf.is_negated()))
    );
    assert!(root.children()[1].as_field().unwrap().is_negated());
}

#[test]
fn negation_preserves_referenced_fields() {
    let tree = (clause("a") | clause("b")) & (clause("c") | clause("d")) & clause("e");
    assert_eq!(tree.negate().fields(), tree.fields());
}

#[test]
fn neutral_elements_swap() {
    assert_eq!(-Expression::MatchAll, Expression::MatchNone);
    assert_eq!(-Expression::MatchNone, Expression::MatchAll);
}

#[test]
fn negation_does_not_mutate_operand() {
    let tree = clause("a") & clause("b");
    let before = tree.clone();

    let _ = tree.negate();

    assert_eq!(tree, before);
}

#[test]
fn double_negation_is_identity_for_nan_operands() {
    let leaf = Expression::gt("x", f64::NAN).unwrap();
    assert_eq!(leaf.negate().negate(), leaf);

    let tree = leaf.clone() | Expression::ne("y", f64::NAN).unwrap();
    assert_eq!(!!tree.clone(), tree);
}
