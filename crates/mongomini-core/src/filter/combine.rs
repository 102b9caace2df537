use crate::{
    error::QueryError,
    filter::{Expression, LogicalExpression, LogicalOperator},
    value::{Value, ValueKind},
};
use log::debug;
use std::{
    fmt,
    ops::{BitAnd, BitOr, Neg, Not},
    sync::Arc,
};

///
/// Combine two expressions under `op`.
///
/// Same-operator nodes are spliced into the result instead of nested:
///     (a AND b) AND c        → AND[a, b, c]
///     (a AND b) AND (c AND d) → AND[a, b, c, d]
/// Opposite-operator nodes stay intact as a single child:
///     (a AND b) OR c         → OR[AND[a, b], c]
///
/// Neutral and absorbing elements short-circuit:
///     MatchAll AND x → x,  MatchNone AND x → MatchNone
///     MatchNone OR x → x,  MatchAll OR x   → MatchAll
///
/// Accepts owned expressions or shared `Arc` handles; shared children are
/// reused without copying.
///
pub fn combine(
    op: LogicalOperator,
    left: impl Into<Arc<Expression>>,
    right: impl Into<Arc<Expression>>,
) -> Expression {
    let left = left.into();
    let right = right.into();

    if left.is_absorbing_for(op) || right.is_absorbing_for(op) {
        return Expression::absorbing(op);
    }
    if left.is_identity_for(op) {
        return Arc::unwrap_or_clone(right);
    }
    if right.is_identity_for(op) {
        return Arc::unwrap_or_clone(left);
    }

    let mut children = Vec::new();
    splice(op, &mut children, left);
    splice(op, &mut children, right);

    Expression::Logical(LogicalExpression { op, children })
}

// Same-operator nodes contribute their children; everything else is one child.
fn splice(op: LogicalOperator, out: &mut Vec<Arc<Expression>>, expr: Arc<Expression>) {
    let same_op_children = match expr.as_ref() {
        Expression::Logical(node) if node.op == op => Some(node.children.clone()),
        _ => None,
    };

    match same_op_children {
        Some(children) => out.extend(children),
        None => out.push(expr),
    }
}

///
/// Operand
///
/// Input to the dynamic combinator. Only expression operands combine; a raw
/// value on either side is an undefined pairing.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Expression(Expression),
    Value(Value),
}

impl Operand {
    #[must_use]
    pub const fn kind(&self) -> OperandKind {
        match self {
            Self::Expression(_) => OperandKind::Expression,
            Self::Value(value) => OperandKind::Value(value.kind()),
        }
    }
}

impl From<Expression> for Operand {
    fn from(expr: Expression) -> Self {
        Self::Expression(expr)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

///
/// OperandKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperandKind {
    Expression,
    Value(ValueKind),
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression => f.write_str("expression"),
            Self::Value(kind) => write!(f, "{kind} value"),
        }
    }
}

/// Combine two dynamic operands, rejecting pairings with no combination rule.
pub fn try_combine(
    op: LogicalOperator,
    left: impl Into<Operand>,
    right: impl Into<Operand>,
) -> Result<Expression, QueryError> {
    match (left.into(), right.into()) {
        (Operand::Expression(left), Operand::Expression(right)) => Ok(combine(op, left, right)),
        (left, right) => {
            let (left, right) = (left.kind(), right.kind());
            debug!("rejected {op} combination of {left} with {right}");

            Err(QueryError::UnsupportedCombination { op, left, right })
        }
    }
}

impl Expression {
    /// Combine into an `$and` expression, flattening nested `$and`s.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        combine(LogicalOperator::And, self, other)
    }

    /// Combine into an `$or` expression, flattening nested `$or`s.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        combine(LogicalOperator::Or, self, other)
    }

    #[must_use]
    pub fn and_option(self, other: Option<Self>) -> Self {
        match other {
            Some(e) => self.and(e),
            None => self,
        }
    }

    #[must_use]
    pub fn or_option(self, other: Option<Self>) -> Self {
        match other {
            Some(e) => self.or(e),
            None => self,
        }
    }

    /// Left fold of `exprs` under `$and`; empty input yields `MatchAll`.
    pub fn all_of<I: IntoIterator<Item = Self>>(exprs: I) -> Self {
        exprs
            .into_iter()
            .fold(Self::MatchAll, |acc, e| combine(LogicalOperator::And, acc, e))
    }

    /// Left fold of `exprs` under `$or`; empty input yields `MatchNone`.
    pub fn any_of<I: IntoIterator<Item = Self>>(exprs: I) -> Self {
        exprs
            .into_iter()
            .fold(Self::MatchNone, |acc, e| combine(LogicalOperator::Or, acc, e))
    }

    /// Collapse structurally equal siblings, keeping first-seen order.
    ///
    /// Applied recursively. A node left with a single child is replaced by
    /// that child, and a child that reduces to a same-operator node is
    /// spliced into its parent. Never applied implicitly by `combine`.
    #[must_use]
    pub fn dedup(&self) -> Self {
        let Self::Logical(node) = self else {
            return self.clone();
        };

        let mut children: Vec<Arc<Self>> = Vec::with_capacity(node.children.len());
        for child in &node.children {
            let mut parts = Vec::new();
            splice(node.op, &mut parts, Arc::new(child.dedup()));

            for part in parts {
                if !children.contains(&part) {
                    children.push(part);
                }
            }
        }

        LogicalExpression::assemble(node.op, children)
    }
}

///
/// Bit Operations
/// `&`, `|`, `-` and `!` on owned and borrowed expressions
///

impl BitAnd for Expression {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitAnd for &Expression {
    type Output = Expression;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.clone().and(rhs.clone())
    }
}

impl BitOr for Expression {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl BitOr for &Expression {
    type Output = Expression;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.clone().or(rhs.clone())
    }
}

impl Neg for Expression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &Expression {
    type Output = Expression;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Not for Expression {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl Not for &Expression {
    type Output = Expression;

    fn not(self) -> Self::Output {
        self.negate()
    }
}
