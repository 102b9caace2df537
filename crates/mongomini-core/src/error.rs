use crate::{
    filter::{FieldOperator, LogicalOperator, OperandKind, ValueShape},
    value::ValueKind,
};
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Construction-time failures of the filter algebra. Errors surface before
/// any partial tree is returned and are never deferred to serialization.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("invalid field name '{field}': {reason}")]
    InvalidField { field: String, reason: &'static str },

    #[error("operator {op} on field '{field}' expects {expected}, found {found}")]
    InvalidOperatorValue {
        field: String,
        op: FieldOperator,
        expected: ValueShape,
        found: ValueKind,
    },

    #[error("unknown operator suffix '{suffix}' in key '{key}'")]
    UnknownOperator { key: String, suffix: String },

    #[error("cannot combine {left} with {right} using {op}")]
    UnsupportedCombination {
        op: LogicalOperator,
        left: OperandKind,
        right: OperandKind,
    },
}

impl QueryError {
    pub(crate) fn invalid_field(field: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason,
        }
    }
}
