//! Immutable expression trees.
//!
//! Module: expr
//! Responsibility: node types, structural comparison, leaf constructors and
//! the operator surface that composes nodes into new trees.
//! Does not own: operand-arity caps, result typing, or any evaluation.
//! Boundary: the n-ary operand cap is a property of the compile step and the
//! engine; construction accepts arbitrarily wide `all`/`any` nodes.

mod coerce;
mod function;
mod methods;
mod operand;
mod ops;
mod text;

pub mod fns;

#[cfg(test)]
mod tests;

pub use coerce::{LOGICAL_KEYWORDS_UNSUPPORTED, Operand, OperandCategory};
pub use function::{FunctionExpr, VectorQuery};
pub use operand::{Boolish, Flexible, Iterable, Numeric, Ordered, Stringy, StringyList};
pub use text::{TextMatch, r#match};

use crate::value::Value;
use std::fmt;

///
/// UnaryOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum UnaryOp {
    Not = 0x01,
    IsNull = 0x02,
    IsNotNull = 0x03,
    Abs = 0x04,
    Ln = 0x05,
    Exp = 0x06,
    Sqrt = 0x07,
    Square = 0x08,
}

///
/// BinaryOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum BinaryOp {
    And = 0x01,
    Or = 0x02,
    Eq = 0x03,
    NotEq = 0x04,
    Lt = 0x05,
    LtEq = 0x06,
    Gt = 0x07,
    GtEq = 0x08,
    StartsWith = 0x09,
    Contains = 0x0a,
    In = 0x0b,
    Add = 0x0c,
    Sub = 0x0d,
    Mul = 0x0e,
    Div = 0x0f,
    Pow = 0x10,
    MatchAll = 0x11,
    MatchAny = 0x12,
    Coalesce = 0x13,
    Min = 0x14,
    Max = 0x15,
}

impl BinaryOp {
    /// True for operators whose result is a boolean.
    #[must_use]
    pub const fn is_predicate(self) -> bool {
        matches!(
            self,
            Self::And
                | Self::Or
                | Self::Eq
                | Self::NotEq
                | Self::Lt
                | Self::LtEq
                | Self::Gt
                | Self::GtEq
                | Self::StartsWith
                | Self::Contains
                | Self::In
                | Self::MatchAll
                | Self::MatchAny
        )
    }
}

///
/// TernaryOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum TernaryOp {
    Choose = 0x01,
    RegexpMatch = 0x02,
}

///
/// NaryOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum NaryOp {
    All = 0x01,
    Any = 0x02,
}

macro_rules! op_tags {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                #[must_use]
                pub const fn tag(self) -> u8 {
                    self as u8
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Debug::fmt(self, f)
                }
            }
        )*
    };
}

op_tags!(UnaryOp, BinaryOp, TernaryOp, NaryOp);

///
/// Expr
///
/// One node of an expression tree. Every builder call returns a new node and
/// moves its operands into it; nothing mutates an existing tree.
///
/// `Expr` has no `PartialEq`. Compare trees with
/// [`Expr::structural_eq`].
///

#[derive(Clone, Debug)]
pub enum Expr {
    Field(String),
    Literal(Value),
    Unary {
        op: UnaryOp,
        expr: Box<Self>,
    },
    Binary {
        left: Box<Self>,
        op: BinaryOp,
        right: Box<Self>,
    },
    Ternary {
        op: TernaryOp,
        x: Box<Self>,
        y: Box<Self>,
        z: Box<Self>,
    },
    Nary {
        op: NaryOp,
        exprs: Vec<Self>,
    },
    Match(TextMatch),
    Function(FunctionExpr),
}

impl Expr {
    pub(crate) fn unary(op: UnaryOp, expr: Self) -> Self {
        Self::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    pub(crate) fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub(crate) fn ternary(op: TernaryOp, x: Self, y: Self, z: Self) -> Self {
        Self::Ternary {
            op,
            x: Box::new(x),
            y: Box::new(y),
            z: Box::new(z),
        }
    }

    /// Deep node-by-node comparison, including operator kind and operand order.
    #[must_use]
    pub fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => a == b,
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Unary { op: a, expr: x }, Self::Unary { op: b, expr: y }) => {
                a == b && x.structural_eq(y)
            }
            (
                Self::Binary {
                    left: l1,
                    op: a,
                    right: r1,
                },
                Self::Binary {
                    left: l2,
                    op: b,
                    right: r2,
                },
            ) => a == b && l1.structural_eq(l2) && r1.structural_eq(r2),
            (
                Self::Ternary {
                    op: a,
                    x: x1,
                    y: y1,
                    z: z1,
                },
                Self::Ternary {
                    op: b,
                    x: x2,
                    y: y2,
                    z: z2,
                },
            ) => a == b && x1.structural_eq(x2) && y1.structural_eq(y2) && z1.structural_eq(z2),
            (Self::Nary { op: a, exprs: x }, Self::Nary { op: b, exprs: y }) => {
                a == b && x.len() == y.len() && x.iter().zip(y).all(|(l, r)| l.structural_eq(r))
            }
            (Self::Match(a), Self::Match(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a == b,
            _ => false,
        }
    }

    /// Visit this node and every descendant in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        match self {
            Self::Field(_) | Self::Literal(_) | Self::Match(_) | Self::Function(_) => {}
            Self::Unary { expr, .. } => expr.walk(visit),
            Self::Binary { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            Self::Ternary { x, y, z, .. } => {
                x.walk(visit);
                y.walk(visit);
                z.walk(visit);
            }
            Self::Nary { exprs, .. } => {
                for expr in exprs {
                    expr.walk(visit);
                }
            }
        }
    }

    #[must_use]
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "field({name})"),
            Self::Literal(value) => write!(f, "literal({value})"),
            Self::Unary { op, expr } => write!(f, "Unary(op={op}, expr={expr})"),
            Self::Binary { left, op, right } => {
                write!(f, "Binary(left={left}, op={op}, right={right})")
            }
            Self::Ternary { op, x, y, z } => write!(f, "Ternary(op={op}, x={x}, y={y}, z={z})"),
            Self::Nary { op, exprs } => {
                write!(f, "Nary(op={op}, exprs=[")?;
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{expr}")?;
                }
                f.write_str("])")
            }
            Self::Match(m) => write!(f, "{m}"),
            Self::Function(func) => write!(f, "{func}"),
        }
    }
}

// ----------------------------------------------------------------------
// Leaf and combinator constructors
// ----------------------------------------------------------------------

/// Reference a document field by name. Existence is not checked here.
#[must_use]
pub fn field(name: impl Into<String>) -> Expr {
    Expr::Field(name.into())
}

/// Wrap a value as a literal node.
#[must_use]
pub fn literal(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

/// Logical negation. Double negation is kept as written.
#[must_use]
pub fn not(expr: impl Into<Expr>) -> Expr {
    Expr::unary(UnaryOp::Not, expr.into())
}

/// Conjunction over an ordered operand list.
#[must_use]
pub fn all<E: Into<Expr>>(exprs: impl IntoIterator<Item = E>) -> Expr {
    Expr::Nary {
        op: NaryOp::All,
        exprs: exprs.into_iter().map(Into::into).collect(),
    }
}

/// Disjunction over an ordered operand list.
#[must_use]
pub fn any<E: Into<Expr>>(exprs: impl IntoIterator<Item = E>) -> Expr {
    Expr::Nary {
        op: NaryOp::Any,
        exprs: exprs.into_iter().map(Into::into).collect(),
    }
}
