//! Abstract Syntax Tree (AST) for tag expressions.

use std::collections::HashSet;
use std::fmt;

use crate::value::TagValue;

/// A set-algebra operator combining two object sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    /// Intersection (`&`): objects present in both operands.
    Intersection,

    /// Union (`|`): objects present in either operand.
    Union,

    /// Difference (`-`): objects in the left operand but not in the right.
    Difference,

    /// Symmetric difference (`^`): objects in exactly one operand.
    SymmetricDifference,
}

impl SetOp {
    /// The ASCII symbol for this operator in expression text.
    pub fn symbol(self) -> char {
        match self {
            SetOp::Intersection => '&',
            SetOp::Union => '|',
            SetOp::Difference => '-',
            SetOp::SymmetricDifference => '^',
        }
    }

    /// Applies the operator to two resolved object sets.
    pub fn apply<T: TagValue>(self, left: HashSet<T>, right: HashSet<T>) -> HashSet<T> {
        match self {
            SetOp::Intersection => left.intersection(&right).cloned().collect(),
            SetOp::Union => left.union(&right).cloned().collect(),
            SetOp::Difference => left.difference(&right).cloned().collect(),
            SetOp::SymmetricDifference => left.symmetric_difference(&right).cloned().collect(),
        }
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A parsed tag expression.
///
/// Leaves are tag names; interior nodes combine two sub-expressions with a
/// [`SetOp`]. Names are resolved against the owning scope's registry only
/// at evaluation time, so an `Expr` is just data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A reference to a tag by name.
    Tag(String),

    /// Two expressions combined with a set operator.
    Binary {
        /// The combining operator.
        op: SetOp,
        /// The left operand.
        left: Box<Expr>,
        /// The right operand.
        right: Box<Expr>,
    },
}

impl Expr {
    /// Creates a tag reference leaf.
    pub fn tag(name: impl Into<String>) -> Self {
        Expr::Tag(name.into())
    }

    /// Creates a binary node combining two expressions.
    pub fn binary(op: SetOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Writes an operand, parenthesizing compound sub-expressions so the
    /// rendered text reads back with the same grouping.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Tag(_) => write!(f, "{}", self),
            Expr::Binary { .. } => write!(f, "({})", self),
        }
    }
}

impl fmt::Display for Expr {
    /// Renders the expression in canonical form: single spaces around
    /// operators, parentheses around compound operands only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Tag(name) => write!(f, "{name}"),
            Expr::Binary { op, left, right } => {
                left.fmt_operand(f)?;
                write!(f, " {op} ")?;
                right.fmt_operand(f)
            }
        }
    }
}
