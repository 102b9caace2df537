use crate::{
    error::QueryError,
    filter::{FieldOperator, LogicalOperator},
    value::Value,
};
use derive_more::{Deref, Display};
use log::debug;
use std::sync::Arc;

///
/// FieldName
///
/// Validated document field path (`name`, `address.city`).
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, PartialEq)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(field: impl Into<String>) -> Result<Self, QueryError> {
        let field = field.into();

        let reason = if field.is_empty() {
            Some("must not be empty")
        } else if field.starts_with('$') {
            Some("must not start with '$'")
        } else if field.contains('\0') {
            Some("must not contain NUL")
        } else {
            None
        };

        if let Some(reason) = reason {
            debug!("rejected field name {field:?}: {reason}");
            return Err(QueryError::invalid_field(field, reason));
        }

        Ok(Self(field))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// FieldExpression
/// one leaf predicate: `field op value`, optionally negated
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldExpression {
    field: FieldName,
    op: FieldOperator,
    value: Value,
    negated: bool,
}

impl FieldExpression {
    /// Build a negation-free leaf, checking the value against the operator's shape.
    pub fn new(
        field: impl Into<String>,
        op: FieldOperator,
        value: impl Into<Value>,
    ) -> Result<Self, QueryError> {
        let field = FieldName::new(field)?;
        let value = value.into();

        let expected = op.value_shape();
        if !expected.accepts(&value) {
            debug!(
                "rejected {op} on '{field}': expected {expected}, found {}",
                value.kind()
            );

            return Err(QueryError::InvalidOperatorValue {
                field: field.to_string(),
                op,
                expected,
                found: value.kind(),
            });
        }

        Ok(Self {
            field,
            op,
            value,
            negated: false,
        })
    }

    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    #[must_use]
    pub const fn op(&self) -> FieldOperator {
        self.op
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Same leaf with the polarity flipped.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            negated: !self.negated,
            ..self.clone()
        }
    }
}

///
/// LogicalExpression
///
/// `$and` / `$or` over at least two children. Children sit behind `Arc`
/// so a sub-tree can be reused under several parents.
///

#[derive(Clone, Debug, PartialEq)]
pub struct LogicalExpression {
    pub(crate) op: LogicalOperator,
    pub(crate) children: Vec<Arc<Expression>>,
}

impl LogicalExpression {
    #[must_use]
    pub const fn op(&self) -> LogicalOperator {
        self.op
    }

    #[must_use]
    pub fn children(&self) -> &[Arc<Expression>] {
        &self.children
    }

    /// Wrap already-flattened children, collapsing degenerate arities.
    pub(crate) fn assemble(op: LogicalOperator, mut children: Vec<Arc<Expression>>) -> Expression {
        match children.len() {
            0 => Expression::identity(op),
            1 => children.pop().map_or_else(|| Expression::identity(op), Arc::unwrap_or_clone),
            _ => Expression::Logical(Self { op, children }),
        }
    }
}

///
/// Expression
///
/// Filter expression tree. Values are immutable; every combinator and
/// negation returns a fresh tree.
///
/// - `MatchAll` is the neutral element of `$and` and serializes to `{}`.
/// - `MatchNone` is its negation.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Expression {
    #[default]
    MatchAll,
    MatchNone,
    Field(FieldExpression),
    Logical(LogicalExpression),
}

impl Expression {
    // --- Leaf ---

    /// Create a single leaf: `field op value`.
    pub fn field(
        field: impl Into<String>,
        op: FieldOperator,
        value: impl Into<Value>,
    ) -> Result<Self, QueryError> {
        FieldExpression::new(field, op, value).map(Self::Field)
    }

    // --- Comparison ---

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Lte, value)
    }

    // --- Membership ---

    pub fn in_iter<I>(field: impl Into<String>, values: I) -> Result<Self, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::field(field, FieldOperator::In, Value::list(values))
    }

    pub fn not_in_iter<I>(field: impl Into<String>, values: I) -> Result<Self, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::field(field, FieldOperator::Nin, Value::list(values))
    }

    // --- Element / evaluation ---

    pub fn exists(field: impl Into<String>, present: bool) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Exists, present)
    }

    pub fn type_of(field: impl Into<String>, alias: impl Into<Value>) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Type, alias)
    }

    pub fn modulo(
        field: impl Into<String>,
        divisor: i64,
        remainder: i64,
    ) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Mod, vec![divisor, remainder])
    }

    pub fn regex(field: impl Into<String>, pattern: impl Into<String>) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Regex, Value::Text(pattern.into()))
    }

    // --- Array ---

    pub fn all<I>(field: impl Into<String>, values: I) -> Result<Self, QueryError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::field(field, FieldOperator::All, Value::list(values))
    }

    /// Match array elements against a nested filter expression.
    pub fn elem_match(field: impl Into<String>, inner: &Self) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::ElemMatch, Value::from(inner.to_json()))
    }

    pub fn size(field: impl Into<String>, len: u64) -> Result<Self, QueryError> {
        Self::field(field, FieldOperator::Size, len)
    }

    // --- Structure ---

    /// Neutral element for `op`: `MatchAll` for `$and`, `MatchNone` for `$or`.
    #[must_use]
    pub const fn identity(op: LogicalOperator) -> Self {
        match op {
            LogicalOperator::And => Self::MatchAll,
            LogicalOperator::Or => Self::MatchNone,
        }
    }

    /// Absorbing element for `op`.
    #[must_use]
    pub const fn absorbing(op: LogicalOperator) -> Self {
        Self::identity(op.flip())
    }

    pub(crate) const fn is_identity_for(&self, op: LogicalOperator) -> bool {
        matches!(
            (op, self),
            (LogicalOperator::And, Self::MatchAll) | (LogicalOperator::Or, Self::MatchNone)
        )
    }

    pub(crate) const fn is_absorbing_for(&self, op: LogicalOperator) -> bool {
        self.is_identity_for(op.flip())
    }

    #[must_use]
    pub const fn as_field(&self) -> Option<&FieldExpression> {
        match self {
            Self::Field(leaf) => Some(leaf),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_logical(&self) -> Option<&LogicalExpression> {
        match self {
            Self::Logical(node) => Some(node),
            _ => None,
        }
    }

    /// Field names referenced by every leaf, in depth-first order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::MatchAll | Self::MatchNone => {}
            Self::Field(leaf) => out.push(leaf.field()),
            Self::Logical(node) => {
                for child in &node.children {
                    child.collect_fields(out);
                }
            }
        }
    }

    // --- Negation ---

    /// Negate this expression, pushing negation down to the leaves.
    ///
    /// - leaf: polarity flipped
    /// - `$and[a, b]` → `$or[!a, !b]`, and the dual
    /// - `MatchAll` ↔ `MatchNone`
    #[must_use]
    pub fn negate(&self) -> Self {
        match self {
            Self::MatchAll => Self::MatchNone,
            Self::MatchNone => Self::MatchAll,
            Self::Field(leaf) => Self::Field(leaf.negate()),
            Self::Logical(node) => Self::Logical(LogicalExpression {
                op: node.op.flip(),
                children: node
                    .children
                    .iter()
                    .map(|child| Arc::new(child.negate()))
                    .collect(),
            }),
        }
    }
}

impl From<FieldExpression> for Expression {
    fn from(leaf: FieldExpression) -> Self {
        Self::Field(leaf)
    }
}

/// Free-function form of [`Expression::negate`].
#[must_use]
pub fn negate(expr: &Expression) -> Expression {
    expr.negate()
}
