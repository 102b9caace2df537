mod leaf;
mod negate;

use crate::filter::Expression;

// ---- helpers -----------------------------------------------------------

/// `field == "foo"` leaf.
pub(super) fn clause(field: &str) -> Expression {
    Expression::eq(field, "foo").expect("valid leaf")
}
