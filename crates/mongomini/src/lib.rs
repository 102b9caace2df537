//! mongomini builds MongoDB filter documents from composable, negatable
//! expressions.
//!
//! ## Crate layout
//! - `core`: values, the expression algebra, shorthand parsing, find requests,
//!   and configuration.
//! - `error`: the public error type every fallible facade call returns.
//!
//! The `prelude` module carries the vocabulary needed to build and run a
//! filter; reach into `core` for the lower-level pieces.

pub use mongomini_core as core;

pub mod error;

pub use error::{Error, ErrorKind};

use crate::core::{config::QueryConfig, filter::Expression, value::Value};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse keyword shorthand with the default separator.
///
/// `filter([("age__gt", 18)])` is `{"age": {"$gt": 18}}`.
pub fn filter<I, K, V>(pairs: I) -> Result<Expression, Error>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<Value>,
{
    Ok(crate::core::filter::parse_shorthand(pairs)?)
}

/// Load and validate a TOML query configuration.
pub fn load_config(input: &str) -> Result<QueryConfig, Error> {
    Ok(QueryConfig::from_toml_str(input)?)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, ErrorKind,
        core::{
            config::QueryConfig,
            filter::{Expression, FieldOperator, LogicalOperator, QueryDocument},
            find::{FindRequest, Finder, Projection, SortDirection},
            value::Value,
        },
        filter,
    };
}
