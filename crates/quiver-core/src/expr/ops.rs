//! Infix operator sugar.
//!
//! `+ - * /` and `& | !` map onto the named methods and build identical trees.
//! Comparisons stay method-only because the std comparison traits must
//! return `bool`.
//!
//! A scalar on the left of a commutative operator mirrors onto the right
//! (`1 + a` builds `a + literal(1)`); for `-` and `/` the literal stays on
//! the left.

use crate::expr::{Boolish, Expr, Numeric, literal};
use std::ops::{Add, BitAnd, BitOr, Div, Mul, Not, Sub};

macro_rules! numeric_infix {
    ($($trait:ident :: $method:ident),* $(,)?) => {
        $(
            impl<T: Into<Numeric>> $trait<T> for Expr {
                type Output = Self;

                fn $method(self, rhs: T) -> Self {
                    Self::$method(self, rhs)
                }
            }

            impl<T: Into<Numeric>> $trait<T> for &Expr {
                type Output = Expr;

                fn $method(self, rhs: T) -> Expr {
                    Expr::$method(self.clone(), rhs)
                }
            }
        )*
    };
}

numeric_infix!(Add::add, Sub::sub, Mul::mul, Div::div);

macro_rules! logical_infix {
    ($($trait:ident :: $method:ident => $named:ident),* $(,)?) => {
        $(
            impl<T: Into<Boolish>> $trait<T> for Expr {
                type Output = Self;

                fn $method(self, rhs: T) -> Self {
                    self.$named(rhs)
                }
            }

            impl<T: Into<Boolish>> $trait<T> for &Expr {
                type Output = Expr;

                fn $method(self, rhs: T) -> Expr {
                    self.clone().$named(rhs)
                }
            }

            impl $trait<Expr> for bool {
                type Output = Expr;

                fn $method(self, rhs: Expr) -> Expr {
                    rhs.$named(self)
                }
            }
        )*
    };
}

logical_infix!(BitAnd::bitand => and, BitOr::bitor => or);

impl Not for Expr {
    type Output = Self;

    fn not(self) -> Self {
        Self::not(self)
    }
}

impl Not for &Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::not(self.clone())
    }
}

macro_rules! reflected_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Add<Expr> for $ty {
                type Output = Expr;

                fn add(self, rhs: Expr) -> Expr {
                    Expr::add(rhs, self)
                }
            }

            impl Mul<Expr> for $ty {
                type Output = Expr;

                fn mul(self, rhs: Expr) -> Expr {
                    Expr::mul(rhs, self)
                }
            }

            impl Sub<Expr> for $ty {
                type Output = Expr;

                fn sub(self, rhs: Expr) -> Expr {
                    Expr::sub(literal(self), rhs)
                }
            }

            impl Div<Expr> for $ty {
                type Output = Expr;

                fn div(self, rhs: Expr) -> Expr {
                    Expr::div(literal(self), rhs)
                }
            }

            impl Add<&Expr> for $ty {
                type Output = Expr;

                fn add(self, rhs: &Expr) -> Expr {
                    Expr::add(rhs.clone(), self)
                }
            }

            impl Mul<&Expr> for $ty {
                type Output = Expr;

                fn mul(self, rhs: &Expr) -> Expr {
                    Expr::mul(rhs.clone(), self)
                }
            }

            impl Sub<&Expr> for $ty {
                type Output = Expr;

                fn sub(self, rhs: &Expr) -> Expr {
                    Expr::sub(literal(self), rhs)
                }
            }

            impl Div<&Expr> for $ty {
                type Output = Expr;

                fn div(self, rhs: &Expr) -> Expr {
                    Expr::div(literal(self), rhs)
                }
            }
        )*
    };
}

reflected_numeric!(i32, i64, u32, f32, f64);
