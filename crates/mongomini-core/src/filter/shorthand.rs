use crate::{
    config::ConfigError,
    error::QueryError,
    filter::{Expression, FieldOperator, LogicalOperator, combine},
    value::Value,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

///
/// CONSTANTS
///

pub const DEFAULT_SEPARATOR: &str = "__";

///
/// ShorthandSyntax
///
/// Keyword shorthand for building conjunctions: `field` or
/// `field<separator>suffix` mapped to a value. The key is split at the last
/// separator, so dotted and separator-containing paths stay intact.
///
/// The separator is validated on every construction path, deserialization
/// included: it is non-empty and never contains `.` or `$`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "RawShorthandSyntax")]
pub struct ShorthandSyntax {
    separator: String,
}

impl Default for ShorthandSyntax {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

///
/// RawShorthandSyntax
/// serde input for [`ShorthandSyntax`], validated on conversion
///

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawShorthandSyntax {
    separator: String,
}

impl Default for RawShorthandSyntax {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl TryFrom<RawShorthandSyntax> for ShorthandSyntax {
    type Error = ConfigError;

    fn try_from(raw: RawShorthandSyntax) -> Result<Self, Self::Error> {
        Self::new(raw.separator)
    }
}

impl ShorthandSyntax {
    pub fn new(separator: impl Into<String>) -> Result<Self, ConfigError> {
        let separator = separator.into();
        Self::check_separator(&separator)?;

        Ok(Self { separator })
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Reject separators that would make key splitting ambiguous.
    pub fn check_separator(separator: &str) -> Result<(), ConfigError> {
        let reason = if separator.is_empty() {
            Some("must not be empty")
        } else if separator.contains(['.', '$']) {
            Some("must not contain '.' or '$'")
        } else {
            None
        };

        match reason {
            Some(reason) => {
                debug!("rejected shorthand separator {separator:?}: {reason}");

                Err(ConfigError::InvalidSeparator {
                    separator: separator.to_string(),
                    reason,
                })
            }
            None => Ok(()),
        }
    }

    /// Split a key into its field and optional operator suffix.
    #[must_use]
    pub fn split_key<'a>(&self, key: &'a str) -> (&'a str, Option<&'a str>) {
        match key.rsplit_once(self.separator.as_str()) {
            Some((field, suffix)) => (field, Some(suffix)),
            None => (key, None),
        }
    }

    /// Resolve a key into `(field, operator)`; a missing suffix means `$eq`.
    pub fn parse_key<'a>(&self, key: &'a str) -> Result<(&'a str, FieldOperator), QueryError> {
        let (field, suffix) = self.split_key(key);
        trace!("shorthand key {key:?} → field {field:?}, suffix {suffix:?}");

        let Some(suffix) = suffix else {
            return Ok((field, FieldOperator::Eq));
        };

        match FieldOperator::from_suffix(suffix) {
            Some(op) => Ok((field, op)),
            None => {
                debug!("rejected shorthand key {key:?}: unknown suffix {suffix:?}");

                Err(QueryError::UnknownOperator {
                    key: key.to_string(),
                    suffix: suffix.to_string(),
                })
            }
        }
    }

    /// Build one leaf per pair and fold them left to right under `$and`.
    ///
    /// Empty input yields `MatchAll`. The first failing pair aborts the parse.
    pub fn parse<I, K, V>(&self, pairs: I) -> Result<Expression, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut expr = Expression::MatchAll;

        for (key, value) in pairs {
            let (field, op) = self.parse_key(key.as_ref())?;
            let leaf = Expression::field(field, op, value)?;

            expr = combine(LogicalOperator::And, expr, leaf);
        }

        Ok(expr)
    }
}

/// Parse keyword shorthand with the default `__` separator.
pub fn parse_shorthand<I, K, V>(pairs: I) -> Result<Expression, QueryError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<Value>,
{
    ShorthandSyntax::default().parse(pairs)
}

impl Expression {
    /// Shorthand constructor; see [`ShorthandSyntax::parse`].
    pub fn from_shorthand<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        parse_shorthand(pairs)
    }
}
