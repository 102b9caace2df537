use crate::{
    error::QueryError,
    filter::{Expression, FieldExpression, FieldOperator, ValueShape},
    value::{Value, ValueKind},
};

#[test]
fn constructors_cover_every_operator() {
    fn assert_leaf(expr: Expression, field: &str, op: FieldOperator, value: Value) {
        match expr {
            Expression::Field(leaf) => {
                assert_eq!(leaf.field(), field);
                assert_eq!(leaf.op(), op);
                assert_eq!(leaf.value(), &value);
                assert!(!leaf.is_negated());
            }
            other => panic!("expected Field, got {other:?}"),
        }
    }

    let list = Value::List(vec![Value::Int(1), Value::Int(2)]);

    assert_leaf(Expression::eq("a", 1).unwrap(), "a", FieldOperator::Eq, Value::Int(1));
    assert_leaf(Expression::ne("a", 1).unwrap(), "a", FieldOperator::Ne, Value::Int(1));
    assert_leaf(Expression::gt("a", 1).unwrap(), "a", FieldOperator::Gt, Value::Int(1));
    assert_leaf(Expression::gte("a", 1).unwrap(), "a", FieldOperator::Gte, Value::Int(1));
    assert_leaf(Expression::lt("a", 1).unwrap(), "a", FieldOperator::Lt, Value::Int(1));
    assert_leaf(Expression::lte("a", 1).unwrap(), "a", FieldOperator::Lte, Value::Int(1));
    assert_leaf(
        Expression::in_iter("a", [1, 2]).unwrap(),
        "a",
        FieldOperator::In,
        list.clone(),
    );
    assert_leaf(
        Expression::not_in_iter("a", [1, 2]).unwrap(),
        "a",
        FieldOperator::Nin,
        list.clone(),
    );
    assert_leaf(
        Expression::all("a", [1, 2]).unwrap(),
        "a",
        FieldOperator::All,
        list,
    );
    assert_leaf(
        Expression::exists("a", true).unwrap(),
        "a",
        FieldOperator::Exists,
        Value::Bool(true),
    );
    assert_leaf(
        Expression::type_of("a", "string").unwrap(),
        "a",
        FieldOperator::Type,
        Value::Text("string".to_string()),
    );
    assert_leaf(
        Expression::modulo("a", 4, 1).unwrap(),
        "a",
        FieldOperator::Mod,
        Value::List(vec![Value::Int(4), Value::Int(1)]),
    );
    assert_leaf(
        Expression::regex("a", "^Fr").unwrap(),
        "a",
        FieldOperator::Regex,
        Value::Text("^Fr".to_string()),
    );
    assert_leaf(
        Expression::size("a", 3).unwrap(),
        "a",
        FieldOperator::Size,
        Value::Uint(3),
    );
}

#[test]
fn in_rejects_scalar_value() {
    let err = FieldExpression::new("tags", FieldOperator::In, "not-a-sequence").unwrap_err();

    assert_eq!(
        err,
        QueryError::InvalidOperatorValue {
            field: "tags".to_string(),
            op: FieldOperator::In,
            expected: ValueShape::Sequence,
            found: ValueKind::Text,
        }
    );
}

#[test]
fn shape_violations_are_rejected_per_operator() {
    let cases: Vec<(FieldOperator, Value)> = vec![
        (FieldOperator::Nin, Value::Int(1)),
        (FieldOperator::All, Value::Text("x".into())),
        (FieldOperator::Exists, Value::Int(1)),
        (FieldOperator::Size, Value::Int(-1)),
        (FieldOperator::Size, Value::Float64(2.0)),
        (FieldOperator::Mod, Value::Int(0)),
        (FieldOperator::Mod, Value::list([4])),
        (FieldOperator::Mod, Value::list([0, 1])),
        (FieldOperator::Regex, Value::Int(1)),
        (FieldOperator::ElemMatch, Value::list([1])),
        (FieldOperator::Type, Value::Bool(true)),
        (FieldOperator::Type, Value::List(vec![])),
        (FieldOperator::Gt, Value::list([1])),
        (FieldOperator::Lte, Value::document([("a", 1)])),
    ];

    for (op, value) in cases {
        let result = FieldExpression::new("f", op, value.clone());
        assert!(
            matches!(result, Err(QueryError::InvalidOperatorValue { .. })),
            "{op} should reject {value:?}"
        );
    }
}

#[test]
fn shape_acceptances_per_operator() {
    let cases: Vec<(FieldOperator, Value)> = vec![
        (FieldOperator::Eq, Value::list([1, 2])),
        (FieldOperator::Ne, Value::Null),
        (FieldOperator::Gt, Value::Float64(1.5)),
        (FieldOperator::Lt, Value::Text("m".into())),
        (FieldOperator::In, Value::List(vec![])),
        (FieldOperator::Size, Value::Uint(0)),
        (FieldOperator::Mod, Value::Int(3)),
        (FieldOperator::Mod, Value::list([3, 1])),
        (FieldOperator::Type, Value::Int(2)),
        (FieldOperator::Type, Value::list(["string", "null"])),
        (FieldOperator::ElemMatch, Value::document([("score", 1)])),
    ];

    for (op, value) in cases {
        assert!(
            FieldExpression::new("f", op, value.clone()).is_ok(),
            "{op} should accept {value:?}"
        );
    }
}

#[test]
fn invalid_field_names_are_rejected() {
    for field in ["", "$where", "a\0b"] {
        assert!(
            matches!(
                Expression::eq(field, 1),
                Err(QueryError::InvalidField { .. })
            ),
            "field {field:?} should be rejected"
        );
    }

    assert!(Expression::eq("address.city", "Oslo").is_ok());
}

#[test]
fn elem_match_embeds_nested_filter() {
    let inner = Expression::gte("score", 80).unwrap() & Expression::lt("score", 90).unwrap();
    let expr = Expression::elem_match("results", &inner).unwrap();

    let leaf = expr.as_field().expect("leaf");
    assert_eq!(leaf.op(), FieldOperator::ElemMatch);
    assert_eq!(leaf.value(), &Value::from(inner.to_json()));
}

#[test]
fn operator_tables_round_trip() {
    for op in FieldOperator::ALL {
        assert_eq!(FieldOperator::from_suffix(op.suffix()), Some(op));
        assert_eq!(FieldOperator::from_token(op.token()), Some(op));
        assert!(op.token().starts_with('$'));
    }

    assert_eq!(FieldOperator::from_suffix("bogus"), None);
    assert_eq!(FieldOperator::from_token("$where"), None);
}
