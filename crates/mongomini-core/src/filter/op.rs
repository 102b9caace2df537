use crate::value::Value;
use std::fmt;

///
/// Wire tokens
///

pub const NOT_TOKEN: &str = "$not";
pub const NOR_TOKEN: &str = "$nor";

///
/// FieldOperator
///
/// Closed vocabulary of field comparison operators. Every variant is bound
/// to exactly one wire token and one shorthand suffix.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
    Exists,
    Type,
    Mod,
    Regex,
    All,
    ElemMatch,
    Size,
}

impl FieldOperator {
    pub const ALL: [Self; 15] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::In,
        Self::Nin,
        Self::Exists,
        Self::Type,
        Self::Mod,
        Self::Regex,
        Self::All,
        Self::ElemMatch,
        Self::Size,
    ];

    /// Canonical filter-document token.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::In => "$in",
            Self::Nin => "$nin",
            Self::Exists => "$exists",
            Self::Type => "$type",
            Self::Mod => "$mod",
            Self::Regex => "$regex",
            Self::All => "$all",
            Self::ElemMatch => "$elemMatch",
            Self::Size => "$size",
        }
    }

    /// Suffix used by the `field__suffix` shorthand.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
            Self::Nin => "nin",
            Self::Exists => "exists",
            Self::Type => "type",
            Self::Mod => "mod",
            Self::Regex => "regex",
            Self::All => "all",
            Self::ElemMatch => "elem_match",
            Self::Size => "size",
        }
    }

    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.suffix() == suffix)
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// Value shape this operator accepts.
    #[must_use]
    pub const fn value_shape(self) -> ValueShape {
        match self {
            Self::Eq | Self::Ne => ValueShape::Any,
            Self::Gt | Self::Gte | Self::Lt | Self::Lte => ValueShape::Scalar,
            Self::In | Self::Nin | Self::All => ValueShape::Sequence,
            Self::Exists => ValueShape::Boolean,
            Self::Type => ValueShape::TypeSpec,
            Self::Mod => ValueShape::Divisor,
            Self::Regex => ValueShape::Text,
            Self::ElemMatch => ValueShape::Document,
            Self::Size => ValueShape::NonNegativeInteger,
        }
    }
}

impl fmt::Display for FieldOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

///
/// LogicalOperator
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::And => "$and",
            Self::Or => "$or",
        }
    }

    /// De Morgan dual.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

///
/// ValueShape
///
/// Structural constraint an operator places on its comparison value.
/// Checked once, when a leaf is constructed.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueShape {
    Any,
    Scalar,
    Sequence,
    Boolean,
    Text,
    Document,
    /// Type alias text, numeric type code, or a non-empty list of those.
    TypeSpec,
    /// Non-zero divisor, or a `[divisor, remainder]` integer pair.
    Divisor,
    NonNegativeInteger,
}

impl ValueShape {
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Scalar => value.kind().is_scalar(),
            Self::Sequence => matches!(value, Value::List(_)),
            Self::Boolean => matches!(value, Value::Bool(_)),
            Self::Text => matches!(value, Value::Text(_)),
            Self::Document => matches!(value, Value::Document(_)),
            Self::TypeSpec => match value {
                Value::List(items) => !items.is_empty() && items.iter().all(is_type_atom),
                other => is_type_atom(other),
            },
            Self::Divisor => match value {
                Value::List(items) => match items.as_slice() {
                    [divisor, remainder] => {
                        divisor.as_integer().is_some_and(|d| d != 0)
                            && remainder.as_integer().is_some()
                    }
                    _ => false,
                },
                other => other.as_integer().is_some_and(|d| d != 0),
            },
            Self::NonNegativeInteger => value.as_integer().is_some_and(|n| n >= 0),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "any value",
            Self::Scalar => "a scalar value",
            Self::Sequence => "a list",
            Self::Boolean => "a boolean",
            Self::Text => "text",
            Self::Document => "a document",
            Self::TypeSpec => "a type alias, type code, or list of those",
            Self::Divisor => "a non-zero divisor or [divisor, remainder] pair",
            Self::NonNegativeInteger => "a non-negative integer",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn is_type_atom(value: &Value) -> bool {
    matches!(value, Value::Text(_)) || value.as_integer().is_some()
}
