use derive_more::Display;
use mongomini_core::{config::ConfigError, error::QueryError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{kind}: {message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        let kind = match err {
            QueryError::InvalidField { .. } | QueryError::InvalidOperatorValue { .. } => {
                ErrorKind::InvalidValue
            }
            QueryError::UnknownOperator { .. } => ErrorKind::UnknownOperator,
            QueryError::UnsupportedCombination { .. } => ErrorKind::Unsupported,
        };

        Self::new(kind, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// A field name or operator value was rejected at construction.
    InvalidValue,

    /// A shorthand key named an operator suffix that does not exist.
    UnknownOperator,

    /// The operands cannot be combined.
    Unsupported,

    /// Configuration failed to parse or validate.
    Config,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use mongomini_core::{
        filter::{LogicalOperator, try_combine},
        value::Value,
    };

    #[test]
    fn query_errors_map_to_kinds() {
        let err: Error = QueryError::UnknownOperator {
            key: "age__bogus".to_string(),
            suffix: "bogus".to_string(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::UnknownOperator);
        assert!(err.message.contains("bogus"));

        let err: Error = try_combine(LogicalOperator::And, Value::Int(1), Value::Null)
            .unwrap_err()
            .into();
        assert_eq!(err.kind, ErrorKind::Unsupported);
    }

    #[test]
    fn config_errors_map_to_config_kind() {
        let err: Error = mongomini_core::config::QueryConfig::from_toml_str("nope = 1")
            .unwrap_err()
            .into();

        assert_eq!(err.kind, ErrorKind::Config);
    }

    #[test]
    fn display_prefixes_kind() {
        let err = Error::new(ErrorKind::InvalidValue, "bad");
        assert_eq!(err.to_string(), "InvalidValue: bad");
    }
}
