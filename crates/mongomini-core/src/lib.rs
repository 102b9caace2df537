//! Core runtime for mongomini: comparison values, the filter expression
//! algebra, keyword shorthand, find requests, and configuration.
//!
//! Everything here is pure data transformation. Nothing opens a connection
//! or touches a collection; filter documents are handed to a caller-supplied
//! [`find::Finder`].
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod filter;
pub mod find;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, configuration, or finders are re-exported here.
///

pub mod prelude {
    pub use crate::{
        filter::{Expression, FieldOperator, LogicalOperator},
        value::Value,
    };
}
