use mongomini::prelude::*;
use serde_json::json;

#[test]
fn shorthand_filter_round_trips_to_document() {
    let expr = filter([("age__gte", Value::from(21)), ("name__ne", Value::from("Bob"))]).unwrap();

    assert_eq!(
        expr.to_json(),
        json!({"$and": [{"age": {"$gte": 21}}, {"name": {"$ne": "Bob"}}]})
    );
}

#[test]
fn negated_shorthand_filter_applies_de_morgan() {
    let expr = !filter([("a", 1), ("b__lt", 2)]).unwrap();

    assert_eq!(
        expr.to_json(),
        json!({"$or": [{"a": {"$not": {"$eq": 1}}}, {"b": {"$not": {"$lt": 2}}}]})
    );
}

#[test]
fn facade_errors_carry_kinds() {
    let err = filter([("tags__in", "solo")]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidValue);

    let err = filter([("tags__nope", 1)]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownOperator);

    let err = mongomini::load_config("[shorthand]\nseparator = \"\"").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Config);
}

#[test]
fn configured_shorthand_and_find_request() {
    let config = mongomini::load_config("dedup_children = true").unwrap();
    let expr = config
        .parse_shorthand([("age__gt", 18), ("age__gt", 18)])
        .unwrap();

    let request = FindRequest::new(expr)
        .skip(10)
        .limit(5)
        .sort_by("age", SortDirection::Descending)
        .unwrap();

    assert_eq!(
        serde_json::Value::Object(request.filter_document()),
        json!({"age": {"$gt": 18}})
    );
    assert_eq!(
        serde_json::Value::Object(request.options_document()),
        json!({"skip": 10, "limit": 5, "sort": {"age": -1}})
    );
}

#[test]
fn version_is_exposed() {
    assert!(!mongomini::VERSION.is_empty());
}
