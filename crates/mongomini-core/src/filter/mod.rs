//! Filter algebra: leaf comparisons, `$and` / `$or` combinators, De Morgan
//! negation, and lowering into filter documents.
//!
//! The tree is schema-agnostic. Shape checks happen once, when a leaf is
//! built; combination, negation and serialization are total.

mod combine;
mod document;
mod expr;
mod op;
mod shorthand;

#[cfg(test)]
mod tests;

pub use combine::{Operand, OperandKind, combine, try_combine};
pub use document::{QueryDocument, to_query_document};
pub use expr::{Expression, FieldExpression, FieldName, LogicalExpression, negate};
pub use op::{FieldOperator, LogicalOperator, NOR_TOKEN, NOT_TOKEN, ValueShape};
pub use shorthand::{DEFAULT_SEPARATOR, ShorthandSyntax, parse_shorthand};
