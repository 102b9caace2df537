use crate::{
    error::QueryError,
    filter::{Expression, ShorthandSyntax},
    value::Value,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// QueryConfig
///
/// Explicit configuration for the shorthand layer. Passed by value to the
/// code that needs it; there is no ambient or inherited lookup.
///
/// ```toml
/// dedup_children = true
///
/// [shorthand]
/// separator = "__"
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub shorthand: ShorthandSyntax,

    /// Collapse structurally equal siblings after shorthand parsing.
    pub dedup_children: bool,
}

impl QueryConfig {
    /// Parse and validate a TOML configuration document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ShorthandSyntax::check_separator(self.shorthand.separator())
    }

    /// Parse keyword shorthand under this configuration.
    pub fn parse_shorthand<I, K, V>(&self, pairs: I) -> Result<Expression, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let expr = self.shorthand.parse(pairs)?;

        Ok(if self.dedup_children {
            expr.dedup()
        } else {
            expr
        })
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse query config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid shorthand separator '{separator}': {reason}")]
    InvalidSeparator {
        separator: String,
        reason: &'static str,
    },
}

///
/// TESTS
///
