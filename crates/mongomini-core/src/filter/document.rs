use crate::{
    filter::{
        Expression, FieldExpression, FieldOperator, LogicalExpression,
        op::{NOR_TOKEN, NOT_TOKEN},
    },
    value::Value,
};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

///
/// QueryDocument
///
/// Filter document handed verbatim to the find collaborator.
/// Key order is insertion order.
///

pub type QueryDocument = Map<String, JsonValue>;

/// Free-function form of [`Expression::to_query_document`].
#[must_use]
pub fn to_query_document(expr: &Expression) -> QueryDocument {
    expr.to_query_document()
}

impl Expression {
    /// Lower the tree into its filter document in a single walk.
    ///
    /// - leaf:          `{ field: { token: value } }`
    /// - negated leaf:  `{ field: { "$not": { token: value } } }`
    /// - logical node:  `{ token: [ child, ... ] }`
    /// - `MatchAll`:    `{}`
    /// - `MatchNone`:   `{ "$nor": [ {} ] }`
    #[must_use]
    pub fn to_query_document(&self) -> QueryDocument {
        match self {
            Self::MatchAll => QueryDocument::new(),
            Self::MatchNone => single(
                NOR_TOKEN,
                JsonValue::Array(vec![JsonValue::Object(QueryDocument::new())]),
            ),
            Self::Field(leaf) => leaf_document(leaf),
            Self::Logical(node) => logical_document(node),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.to_query_document())
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_query_document().serialize(serializer)
    }
}

fn leaf_document(leaf: &FieldExpression) -> QueryDocument {
    let mut condition = single(leaf.op().token(), operand_json(leaf.op(), leaf.value()));
    if leaf.is_negated() {
        condition = single(NOT_TOKEN, JsonValue::Object(condition));
    }

    single(leaf.field(), JsonValue::Object(condition))
}

fn logical_document(node: &LogicalExpression) -> QueryDocument {
    let children = node
        .children()
        .iter()
        .map(|child| child.to_json())
        .collect();

    single(node.op().token(), JsonValue::Array(children))
}

// `$mod` takes `[divisor, remainder]`; a bare divisor means remainder zero.
fn operand_json(op: FieldOperator, value: &Value) -> JsonValue {
    match (op, value) {
        (FieldOperator::Mod, Value::Int(_) | Value::Uint(_)) => {
            JsonValue::Array(vec![value.to_json(), JsonValue::from(0)])
        }
        _ => value.to_json(),
    }
}

fn single(key: &str, value: JsonValue) -> QueryDocument {
    let mut doc = QueryDocument::new();
    doc.insert(key.to_string(), value);
    doc
}
