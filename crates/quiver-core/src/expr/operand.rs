//! Typed operand categories.
//!
//! Each operator accepts exactly one category; the `From` impls below are the
//! full conversion table, so an operand of the wrong type fails to compile
//! rather than failing at runtime. The dynamic counterpart lives in `coerce`.

use crate::{
    expr::{Expr, TextMatch, literal},
    value::{List, Matrix, Number, SparseVector, Value, Vector},
};

macro_rules! operand_category {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name(Expr);

        impl $name {
            #[must_use]
            pub fn into_expr(self) -> Expr {
                self.0
            }
        }

        impl From<$name> for Expr {
            fn from(operand: $name) -> Self {
                operand.0
            }
        }

        impl From<Expr> for $name {
            fn from(expr: Expr) -> Self {
                Self(expr)
            }
        }

        impl From<&Expr> for $name {
            fn from(expr: &Expr) -> Self {
                Self(expr.clone())
            }
        }
    };
}

macro_rules! operand_literals {
    ($name:ident: $($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for $name {
                fn from(v: $ty) -> Self {
                    Self(literal(v))
                }
            }
        )*
    };
}

operand_category!(
    /// Integer, float or expression. Accepted by arithmetic and `coalesce`.
    Numeric
);
operand_category!(
    /// Numeric or string operand. Accepted by comparisons, `min` and `max`.
    Ordered
);
operand_category!(
    /// Boolean or expression. Accepted by `and` / `or`.
    Boolish
);
operand_category!(
    /// Any literal value, including null, or an expression.
    Flexible
);
operand_category!(
    /// String or expression. Accepted by `starts_with`.
    Stringy
);
operand_category!(
    /// String, list of strings, or expression. Accepted by `match_all` / `match_any`.
    StringyList
);
operand_category!(
    /// Typed list, string, or expression. Accepted by `in_`.
    Iterable
);

operand_literals!(Numeric: i8, i16, i32, i64, u8, u16, u32, f32, f64, Number);
operand_literals!(Ordered: i8, i16, i32, i64, u8, u16, u32, f32, f64, Number, &str, String);
operand_literals!(Boolish: bool);
operand_literals!(
    Flexible: bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, Number, &str, String, Vec<u8>,
    Vector, SparseVector, List, Matrix, Value,
);
operand_literals!(Stringy: &str, String);
operand_literals!(StringyList: &str, String);
operand_literals!(Iterable: &str, String, List);

impl<T: Into<Value>> From<Option<T>> for Flexible {
    fn from(v: Option<T>) -> Self {
        Self(literal(v))
    }
}

impl From<Vec<String>> for StringyList {
    fn from(v: Vec<String>) -> Self {
        Self(literal(List::String(v)))
    }
}

impl From<Vec<&str>> for StringyList {
    fn from(v: Vec<&str>) -> Self {
        Self(literal(List::from(v)))
    }
}

macro_rules! iterable_from_vec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for Iterable {
                fn from(v: Vec<$ty>) -> Self {
                    Self(literal(List::from(v)))
                }
            }
        )*
    };
}

iterable_from_vec!(String, &str, i32, i64, u32, f32, f64);

macro_rules! operand_from_match {
    ($($name:ident),*) => {
        $(
            impl From<TextMatch> for $name {
                fn from(m: TextMatch) -> Self {
                    Self(Expr::Match(m))
                }
            }
        )*
    };
}

operand_from_match!(Boolish, Flexible);
